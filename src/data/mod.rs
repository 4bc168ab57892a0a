pub mod game_config;

pub use game_config::{
    load_default_game_config, load_game_config, parse_game_config, ConfigError, GameConfig,
    VariantWeights, DEFAULT_GAME_CONFIG_PATH,
};
