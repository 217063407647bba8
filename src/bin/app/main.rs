mod app;
mod cmd;
mod utils;

use std::process::ExitCode;
use app::App;

fn main() -> ExitCode {
    let app = App::new();
    match app.run() { 
        Ok(res) => { 
            println!("{res}");
            ExitCode::SUCCESS
        },
        Err(e) => { 
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
