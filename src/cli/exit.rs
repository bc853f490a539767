/// Run outcome determining exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every matched invoice renamed without warnings (exit 0).
    Clean,
    /// No match in the folder, or some file skipped or failed (exit 1).
    Partial,
    /// Invalid folder, bad arguments or output failure (exit 2).
    Refusal,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Clean => 0,
            Outcome::Partial => 1,
            Outcome::Refusal => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Clean => "CLEAN",
            Outcome::Partial => "PARTIAL",
            Outcome::Refusal => "REFUSAL",
        }
    }
}
