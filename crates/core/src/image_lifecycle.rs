//! Image lifecycle decision table for game updates.
//!
//! Given what the form submitted and what the game currently references,
//! decide which image the game should point to afterwards and which image
//! (if any) must be discarded. Executing the plan is the caller's job.

use crate::types::DbId;

/// Value of the `removeImage` form field that requests clearing the image.
pub const REMOVE_IMAGE_YES: &str = "yes";

/// What a game update does to the game's image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePlan {
    /// Store the uploaded file as a new image and point the game at it.
    /// `replaced` is discarded once the game has been saved.
    Attach { replaced: Option<DbId> },
    /// Clear the game's image and discard `removed`.
    Detach { removed: DbId },
    /// Keep whatever the game references now.
    Retain(Option<DbId>),
    /// The password gate failed; nothing may change. `current` is the
    /// reference the re-rendered form keeps showing.
    Refused { current: Option<DbId> },
}

impl ImagePlan {
    /// Image the game still references if this plan is applied, not counting
    /// a newly attached upload.
    pub fn surviving(&self) -> Option<DbId> {
        match *self {
            ImagePlan::Attach { .. } | ImagePlan::Detach { .. } => None,
            ImagePlan::Retain(current) | ImagePlan::Refused { current } => current,
        }
    }

    /// Image that must be deleted (record and backing file) after the game
    /// row is written.
    pub fn discarded(&self) -> Option<DbId> {
        match *self {
            ImagePlan::Attach { replaced } => replaced,
            ImagePlan::Detach { removed } => Some(removed),
            ImagePlan::Retain(_) | ImagePlan::Refused { .. } => None,
        }
    }
}

/// Whether the raw `removeImage` field asks for the image to be cleared.
pub fn is_remove_requested(raw: Option<&str>) -> bool {
    raw.map(str::trim) == Some(REMOVE_IMAGE_YES)
}

/// Decide the image outcome of a game update.
///
/// The gate is consulted before anything destructive: a failed gate refuses
/// both replacement and removal, leaving `previous` untouched.
pub fn plan_image_change(
    uploaded: bool,
    previous: Option<DbId>,
    remove_requested: bool,
    gate_passed: bool,
) -> ImagePlan {
    if !gate_passed {
        return ImagePlan::Refused { current: previous };
    }
    if uploaded {
        return ImagePlan::Attach { replaced: previous };
    }
    match previous {
        Some(removed) if remove_requested => ImagePlan::Detach { removed },
        current => ImagePlan::Retain(current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_replaces_previous() {
        let plan = plan_image_change(true, Some(4), false, true);
        assert_eq!(plan, ImagePlan::Attach { replaced: Some(4) });
        assert_eq!(plan.discarded(), Some(4));
    }

    #[test]
    fn upload_wins_over_remove_request() {
        assert_eq!(
            plan_image_change(true, Some(4), true, true),
            ImagePlan::Attach { replaced: Some(4) }
        );
    }

    #[test]
    fn upload_without_previous_discards_nothing() {
        let plan = plan_image_change(true, None, false, true);
        assert_eq!(plan, ImagePlan::Attach { replaced: None });
        assert_eq!(plan.discarded(), None);
    }

    #[test]
    fn remove_with_gate_detaches() {
        let plan = plan_image_change(false, Some(9), true, true);
        assert_eq!(plan, ImagePlan::Detach { removed: 9 });
        assert_eq!(plan.surviving(), None);
        assert_eq!(plan.discarded(), Some(9));
    }

    #[test]
    fn remove_with_failed_gate_is_refused() {
        let plan = plan_image_change(false, Some(9), true, false);
        assert_eq!(plan, ImagePlan::Refused { current: Some(9) });
        assert_eq!(plan.surviving(), Some(9));
        assert_eq!(plan.discarded(), None);
    }

    #[test]
    fn upload_with_failed_gate_is_refused() {
        assert_eq!(
            plan_image_change(true, Some(2), false, false),
            ImagePlan::Refused { current: Some(2) }
        );
    }

    #[test]
    fn no_change_requested_carries_image_forward() {
        let plan = plan_image_change(false, Some(5), false, true);
        assert_eq!(plan, ImagePlan::Retain(Some(5)));
        assert_eq!(plan.discarded(), None);
    }

    #[test]
    fn nothing_before_and_nothing_uploaded_stays_unset() {
        assert_eq!(plan_image_change(false, None, false, true), ImagePlan::Retain(None));
        assert_eq!(plan_image_change(false, None, true, true), ImagePlan::Retain(None));
    }

    #[test]
    fn remove_flag_parsing() {
        assert!(is_remove_requested(Some("yes")));
        assert!(!is_remove_requested(Some("no")));
        assert!(!is_remove_requested(Some("YES")));
        assert!(!is_remove_requested(None));
    }
}
