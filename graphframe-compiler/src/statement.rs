use graphframe_core::Row;

/// A compiled statement: backend text plus its bound parameter map, per
/// §3's "Compiled statement" (the `(text, parameters)` pair every compiler
/// in this crate produces).
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledStatement {
    /// The backend statement text. Contains no user-supplied scalar (I1) —
    /// every bound value is referenced only by placeholder name.
    pub text: String,
    /// The placeholder name → bound value map. Its key set is exactly the
    /// set of placeholder names appearing in `text` (P2).
    pub parameters: Row,
}

impl CompiledStatement {
    /// Returns a copy with `EXPLAIN ` prepended to `text`, for the
    /// write-plan lifecycle's `explain` transition.
    pub fn explained(&self) -> Self {
        Self {
            text: format!("EXPLAIN {}", self.text),
            parameters: self.parameters.clone(),
        }
    }

    /// Returns a copy with `PROFILE ` prepended to `text`, for the
    /// write-plan lifecycle's `profile` transition.
    pub fn profiled(&self) -> Self {
        Self {
            text: format!("PROFILE {}", self.text),
            parameters: self.parameters.clone(),
        }
    }
}
