//! Next-state computation for a game update submission.

use crate::forms::{FieldError, GameFields};
use crate::image_lifecycle::{plan_image_change, ImagePlan};
use crate::types::DbId;

/// What the update workflow should do with a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum NextGameState {
    /// Write `fields` and apply `image`. `image` is never [`ImagePlan::Refused`].
    Persist { fields: GameFields, image: ImagePlan },
    /// The password gate failed. `errors` holds any validation failures so
    /// the form can show them alongside the mismatch indicator.
    RejectPasswordMismatch {
        errors: Vec<FieldError>,
        image: Option<DbId>,
    },
    RejectValidation(Vec<FieldError>),
}

/// Combine validation, gate and image decisions for an update.
///
/// A failed gate takes precedence over validation errors and leaves the
/// game's image reference as it was.
pub fn compute_next_game_state(
    previous_image: Option<DbId>,
    submitted: Result<GameFields, Vec<FieldError>>,
    uploaded: bool,
    remove_requested: bool,
    password_ok: bool,
) -> NextGameState {
    let plan = plan_image_change(uploaded, previous_image, remove_requested, password_ok);

    if let ImagePlan::Refused { current } = plan {
        return NextGameState::RejectPasswordMismatch {
            errors: submitted.err().unwrap_or_default(),
            image: current,
        };
    }

    match submitted {
        Ok(fields) => NextGameState::Persist { fields, image: plan },
        Err(errors) => NextGameState::RejectValidation(errors),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn fields() -> GameFields {
        GameFields {
            title: "Terraria".into(),
            description: "Sandbox".into(),
            stock: 7,
            price: 10.0,
            genre_id: 1,
        }
    }

    fn title_error() -> Vec<FieldError> {
        vec![FieldError::new("title", "Title must not be empty.", "")]
    }

    #[test]
    fn correct_password_no_file_keeps_image() {
        let next = compute_next_game_state(Some(11), Ok(fields()), false, false, true);
        assert_eq!(
            next,
            NextGameState::Persist {
                fields: fields(),
                image: ImagePlan::Retain(Some(11)),
            }
        );
    }

    #[test]
    fn correct_password_with_upload_replaces() {
        let next = compute_next_game_state(Some(11), Ok(fields()), true, false, true);
        assert_matches!(
            next,
            NextGameState::Persist { image: ImagePlan::Attach { replaced: Some(11) }, .. }
        );
    }

    #[test]
    fn correct_password_remove_detaches() {
        let next = compute_next_game_state(Some(11), Ok(fields()), false, true, true);
        assert_matches!(
            next,
            NextGameState::Persist { image: ImagePlan::Detach { removed: 11 }, .. }
        );
    }

    #[test]
    fn wrong_password_rejects_and_keeps_image() {
        let next = compute_next_game_state(Some(11), Ok(fields()), false, true, false);
        assert_eq!(
            next,
            NextGameState::RejectPasswordMismatch {
                errors: vec![],
                image: Some(11),
            }
        );
    }

    #[test]
    fn wrong_password_takes_precedence_over_validation() {
        let next = compute_next_game_state(None, Err(title_error()), true, false, false);
        assert_eq!(
            next,
            NextGameState::RejectPasswordMismatch {
                errors: title_error(),
                image: None,
            }
        );
    }

    #[test]
    fn validation_failure_with_correct_password() {
        let next = compute_next_game_state(Some(3), Err(title_error()), true, true, true);
        assert_eq!(next, NextGameState::RejectValidation(title_error()));
    }
}
