// A preview-layer switching pane, made with the Bevy game engine.

use clap::Parser;

use layerswap::core::app::create_app;
use layerswap::core::cli::CliArgs;
use layerswap::logger::init_custom_logger;

fn main() {
    let cli_args = CliArgs::parse();
    init_custom_logger(cli_args.debug);
    create_app(cli_args).run();
}
