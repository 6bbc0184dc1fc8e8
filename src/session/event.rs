//! Events that drive session transitions

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // User events
    /// The topic form was submitted with the entry field's text
    TopicSubmitted { text: String },
    /// The restart control was activated
    RestartRequested,
    /// The composer was submitted with its text, exactly as typed
    MessageSubmitted { text: String },

    // Exchange events
    /// The in-flight exchange finished
    ExchangeResolved { outcome: ExchangeOutcome },
}

/// How an exchange concluded, as interpreted from the wire response.
/// The precedence mirrors the response contract: a populated `response`
/// field wins, then a populated `error` field; empty strings count as
/// absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// Success body with assistant text
    Reply(String),
    /// Success body carrying an application-level error
    ApplicationError(String),
    /// Success body with neither field populated
    Empty,
    /// Non-success status, network failure or malformed body
    TransportFailure(String),
}
