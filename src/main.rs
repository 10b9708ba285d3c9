use clap::Parser;
use ggez::{event, GameResult};
use log::{error, info};

use snake_menus::app::SnakeApp;
use snake_menus::cli::{Cli, GameKind};
use snake_menus::config::{GameConfig, WINDOW_HEIGHT, WINDOW_WIDTH};
use snake_menus::leaderboard::JsonLeaderboard;
use snake_menus::GameController;

fn run_snake(config: GameConfig) -> GameResult {
    let resource_dir = std::path::PathBuf::from("./resources");
    let window_setup = ggez::conf::WindowSetup::default()
        .title("snake")
        .vsync(true);
    let window_mode = ggez::conf::WindowMode::default()
        .dimensions(WINDOW_WIDTH, WINDOW_HEIGHT)
        .resizable(false);

    let (mut ctx, event_loop) = ggez::ContextBuilder::new("snake", "snake_menus")
        .add_resource_path(resource_dir)
        .window_setup(window_setup)
        .window_mode(window_mode)
        .build()?;

    let store = JsonLeaderboard::new(config.leaderboard_file.clone());
    let app = SnakeApp::new(&mut ctx, GameController::new(config, store));
    event::run(ctx, event_loop, app)
}

fn main() -> GameResult {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match cli.game_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };
    info!(
        "starting {:?} on a {}x{} grid, leaderboard at {}",
        cli.game,
        config.grid_width,
        config.grid_height,
        config.leaderboard_file.display()
    );

    match cli.game {
        GameKind::Snake => run_snake(config),
    }
}
