use std::process::ExitCode;

fn main() -> ExitCode {
    ExitCode::from(invoice_renamer::run())
}
