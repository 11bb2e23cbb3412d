use monitor::{err, session};
use std::io;

fn main() -> Result<(), err::DebugFromDisplay<io::Error>> {
    if atty::is(atty::Stream::Stdin) {
        eprintln!("Serial output must be piped into stdin, for example:");
        eprintln!();
        eprintln!("    stty -F /dev/ttyACM0 115200 raw && cat /dev/ttyACM0 | monitor");
        eprintln!();
        eprintln!("Report lines are charted, anything else is shown in the log.");
        eprintln!("Press q or Ctrl-C to exit.");
        return Ok(());
    }

    session::run(io::stdin().lock())?;
    Ok(())
}
