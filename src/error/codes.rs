#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidArguments = 2,
    DestinationNotFound = 3,
    PermissionError = 4,
    SourceNotFound = 5,
    PartialFailure = 6,
    Cancelled = 7,
    ReportError = 8,
    DestinationBusy = 9,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}
