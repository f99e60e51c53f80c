/// Classification of a source failure.
///
/// Used by the screening pipeline to decide what a failed fetch means for
/// the ticker and for the rest of the run.
///
/// # Behavior Summary
///
/// | Class | Primary fetch | Secondary fetch | Counts toward block guard? |
/// |-------|---------------|-----------------|----------------------------|
/// | `Rejected` | Ticker excluded | n/a | No |
/// | `Absent` | Ticker excluded | Fields missing | No (resets) |
/// | `Throttled` | n/a | Fields missing | Yes |
/// | `Unavailable` | Ticker excluded | Fields missing | No (resets) |
/// | `Skipped` | n/a | Fields missing | No |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailureClass {
    /// The ticker itself is invalid; no request was made.
    Rejected,

    /// The provider does not know the ticker.
    Absent,

    /// The provider is throttling us (HTTP 429 or an equivalent page).
    /// Expected during a run and never fatal.
    Throttled,

    /// The provider is unreachable or answered with something we could
    /// not decode.
    Unavailable,

    /// The fetch was not attempted because the source is disabled for
    /// the rest of the run.
    Skipped,
}
