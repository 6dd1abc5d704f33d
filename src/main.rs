//! arecanut main entrypoint.

use arecanut::run;
use arecanut::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(e);
        std::process::exit(1);
    }
}
