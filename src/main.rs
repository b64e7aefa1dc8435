use std::io;

use mixeq::config::Settings;

fn main() {
    let settings = Settings::from_env();
    mixeq::log::init_logger(settings.debug);

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = mixeq::cli::run(&mut stdin.lock(), &mut stdout.lock(), &settings) {
        eprintln!("发生了一个错误: {err}");
    }
}
