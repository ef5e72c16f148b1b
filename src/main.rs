use clap::{Args, Parser, Subcommand};
use munch::config::Config;
use munch::controllers::{
    RecipeFilter, add_recipe_to_shopping_list, add_shopping_list_item, clear_shopping_list,
    delete_recipe, delete_shopping_list_item, get_recipe, get_shopping_list, list_cuisines,
    list_recipes, set_checked, toggle_favorite,
};
use munch::models::api::RecipeOrigin;
use munch::{db, logging, seed};
use sqlx::SqlitePool;

#[derive(Parser)]
#[command(name = "munch", about = "Browse recipes and build a shopping list")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List recipes, newest first
    Recipes(ListArgs),
    /// Show one recipe, optionally scaled to a number of servings
    Show {
        id: i64,
        #[arg(long)]
        servings: Option<u32>,
    },
    /// List the cuisines in the catalog
    Cuisines,
    /// Toggle a recipe's favorite state
    Favorite { id: i64 },
    /// Delete a user-authored recipe
    Delete { id: i64 },
    /// Load the bundled catalog, replacing any earlier copy of it
    Seed,
    /// Work with the shopping list
    #[command(subcommand)]
    Shop(ShopCommand),
}

#[derive(Args)]
struct ListArgs {
    #[arg(long)]
    cuisine: Option<String>,
    #[arg(long)]
    max_duration: Option<i64>,
    #[arg(long)]
    equipment: Option<String>,
    #[arg(long)]
    search: Option<String>,
    /// Only user-authored (true) or only bundled/imported (false) recipes
    #[arg(long)]
    custom: Option<bool>,
    /// onegai, user or themealdb
    #[arg(long)]
    source: Option<RecipeOrigin>,
    #[arg(long)]
    favorites: bool,
}

#[derive(Subcommand)]
enum ShopCommand {
    /// Print the shopping list grouped by recipe
    List,
    /// Add a hand-written item
    Add {
        text: String,
        #[arg(long)]
        recipe: Option<i64>,
    },
    /// Add every ingredient of a recipe, scaled to a number of servings
    FromRecipe {
        id: i64,
        #[arg(long)]
        servings: Option<u32>,
    },
    /// Mark an item as bought
    Check {
        id: i64,
        #[arg(long)]
        unchecked: bool,
    },
    Remove { id: i64 },
    /// Remove everything, or only checked items
    Clear {
        #[arg(long)]
        checked: bool,
    },
}

impl From<ListArgs> for RecipeFilter {
    fn from(args: ListArgs) -> Self {
        RecipeFilter {
            cuisine: args.cuisine,
            max_duration: args.max_duration,
            equipment: args.equipment,
            search: args.search,
            custom: args.custom,
            source: args.source,
            favorites_only: args.favorites,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    let config = Config::from_env()?;
    let pool = db::connect(&config).await?;

    run(&pool, cli.command).await
}

async fn run(pool: &SqlitePool, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Recipes(args) => {
            for recipe in list_recipes(pool, &args.into()).await? {
                let star = if recipe.is_favorite { "*" } else { " " };
                println!(
                    "{star} {:>4}  {}  [{}, {} min, serves {}]",
                    recipe.id, recipe.name, recipe.cuisine, recipe.duration, recipe.servings
                );
            }
        }
        Command::Show { id, servings } => {
            let recipe = get_recipe(pool, id).await?.scaled_to(servings);
            print!("{recipe}");
        }
        Command::Cuisines => {
            for cuisine in list_cuisines(pool).await? {
                println!("{cuisine}");
            }
        }
        Command::Favorite { id } => {
            let is_favorite = toggle_favorite(pool, id).await?;
            println!(
                "Recipe {id} {}",
                if is_favorite { "added to favorites" } else { "removed from favorites" }
            );
        }
        Command::Delete { id } => {
            delete_recipe(pool, id).await?;
            println!("Deleted recipe {id}");
        }
        Command::Seed => {
            let seeded = seed::seed_catalog(pool).await?;
            println!("Seeded {seeded} recipes");
        }
        Command::Shop(command) => run_shop(pool, command).await?,
    }

    Ok(())
}

async fn run_shop(pool: &SqlitePool, command: ShopCommand) -> anyhow::Result<()> {
    match command {
        ShopCommand::List => {
            let list = get_shopping_list(pool).await?;
            if list.is_empty() {
                println!("Shopping list is empty.");
            } else {
                println!("{list}");
            }
        }
        ShopCommand::Add { text, recipe } => {
            let item = add_shopping_list_item(pool, &text, recipe).await?;
            println!("Added item {}", item.id);
        }
        ShopCommand::FromRecipe { id, servings } => {
            let added = add_recipe_to_shopping_list(pool, id, servings).await?;
            println!("Added {added} ingredients to your shopping list!");
        }
        ShopCommand::Check { id, unchecked } => set_checked(pool, id, !unchecked).await?,
        ShopCommand::Remove { id } => delete_shopping_list_item(pool, id).await?,
        ShopCommand::Clear { checked } => {
            let removed = clear_shopping_list(pool, checked).await?;
            println!("Removed {removed} items");
        }
    }

    Ok(())
}
