/// Return type of code that runs forever. Stands in for the unstable `!` in generic positions
/// such as `Result<Never>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Never {}
