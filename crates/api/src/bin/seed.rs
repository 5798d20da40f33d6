//! Fill an empty catalog with sample genres and games.
//!
//! Usage: `DATABASE_URL=postgres://... vidya-seed`

use anyhow::{anyhow, Context};
use vidya_core::forms::{GameSubmission, GenreSubmission};
use vidya_db::models::game::CreateGame;
use vidya_db::models::genre::{CreateGenre, Genre};
use vidya_db::store::{CatalogStore, PgCatalogStore};

const GENRES: &[(&str, &str)] = &[
    (
        "FPS",
        "First-person shooter (FPS) is a video game genre centered on gun and other weapon-based \
         combat in a first-person perspective; that is, the player experiences the action through \
         the eyes of the protagonist. The genre shares common traits with other shooter games, \
         which in turn makes it fall under the heading action game. Since the genre's inception, \
         advanced 3D and pseudo-3D graphics have challenged hardware development, and multiplayer \
         gaming has been integral.",
    ),
    (
        "MMORPG",
        "A massively multiplayer online role-playing game (MMORPG) is a video game that combines \
         aspects of a role-playing video game and a massively multiplayer online game.",
    ),
    (
        "Indie",
        "An independent video game or indie game is a video game typically created by individuals \
         or smaller development teams without the financial and technical support of a large game \
         publisher, in contrast to most \"AAA\" (triple-A) games.",
    ),
];

/// Sample game: title, description, price, stock, index into [`GENRES`].
struct SampleGame {
    title: &'static str,
    description: &'static str,
    price: &'static str,
    stock: &'static str,
    genre: usize,
}

const GAMES: &[SampleGame] = &[
    SampleGame {
        title: "Counter-Strike",
        description: "Counter-Strike (CS) is a series of multiplayer first-person shooter video \
                      games in which teams of terrorists battle to perpetrate an act of terror \
                      (bombing, hostage-taking, assassination) while counter-terrorists try to \
                      prevent it (bomb defusal, hostage rescue).",
        price: "15",
        stock: "3",
        genre: 0,
    },
    SampleGame {
        title: "World of Warcraft",
        description: "World of Warcraft (WoW) is a massively multiplayer online role-playing game \
                      (MMORPG) released in 2004 by Blizzard Entertainment.",
        price: "20",
        stock: "5",
        genre: 1,
    },
    SampleGame {
        title: "Terraria",
        description: "Terraria is an action-adventure sandbox game developed by Re-Logic.",
        price: "10",
        stock: "7",
        genre: 2,
    },
    SampleGame {
        title: "Tom Clancy's Rainbow Six Siege",
        description: "Tom Clancy's Rainbow Six Siege is an online tactical shooter video game \
                      developed by Ubisoft Montreal and published by Ubisoft. The game puts heavy \
                      emphasis on environmental destruction and cooperation between players. Each \
                      player assumes control of an attacker or a defender in different gameplay \
                      modes such as rescuing a hostage, defusing a bomb, and taking control of an \
                      objective within a room.",
        price: "35",
        stock: "3",
        genre: 0,
    },
    SampleGame {
        title: "Stardew Valley",
        description: "Stardew Valley is a simulation role-playing video game developed by Eric \
                      \"ConcernedApe\" Barone. In Stardew Valley, players take the role of a \
                      character who, to get away from the hustle of the city, takes over their \
                      deceased grandfather's dilapidated farm in a place known as Stardew Valley. \
                      The game is open-ended, allowing players to take on several activities such \
                      as growing crops, raising livestock, crafting goods, mining for ores, \
                      selling produce, and socializing with the townsfolk, including marriage and \
                      having children.",
        price: "15",
        stock: "5",
        genre: 2,
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vidya_seed=info".into()),
        )
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = vidya_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    vidya_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let store = PgCatalogStore::new(pool);
    if store.count_genres().await? > 0 {
        tracing::info!("Catalog already has genres, nothing to seed");
        return Ok(());
    }

    let genres = seed_genres(&store).await?;
    seed_games(&store, &genres).await?;

    tracing::info!(genres = genres.len(), games = GAMES.len(), "Catalog seeded");
    Ok(())
}

/// Create the sample genres in order. The returned list lines up with
/// [`GENRES`] so games can refer to genres by index.
async fn seed_genres(store: &dyn CatalogStore) -> anyhow::Result<Vec<Genre>> {
    let mut created = Vec::with_capacity(GENRES.len());
    for (name, description) in GENRES {
        let fields = GenreSubmission {
            name: (*name).into(),
            description: (*description).into(),
        }
        .check()
        .outcome
        .map_err(|errors| anyhow!("invalid sample genre {name}: {errors:?}"))?;

        let genre = store
            .create_genre(&CreateGenre {
                name: fields.name,
                description: fields.description,
            })
            .await?;
        tracing::info!(genre_id = genre.id, name = %genre.name, "Genre seeded");
        created.push(genre);
    }
    Ok(created)
}

async fn seed_games(store: &dyn CatalogStore, genres: &[Genre]) -> anyhow::Result<()> {
    for sample in GAMES {
        let genre = genres
            .get(sample.genre)
            .with_context(|| format!("no sample genre at index {}", sample.genre))?;

        let fields = GameSubmission {
            title: sample.title.into(),
            description: sample.description.into(),
            stock: sample.stock.into(),
            price: sample.price.into(),
            genre: Some(genre.id.to_string()),
        }
        .check()
        .outcome
        .map_err(|errors| anyhow!("invalid sample game {}: {errors:?}", sample.title))?;

        let game = store
            .create_game(&CreateGame {
                title: fields.title,
                description: fields.description,
                stock: fields.stock,
                price: fields.price,
                genre_id: fields.genre_id,
                image_id: None,
            })
            .await?;
        tracing::info!(game_id = game.id, title = %game.title, "Game seeded");
    }
    Ok(())
}
