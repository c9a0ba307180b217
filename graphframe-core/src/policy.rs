/// The one externally configurable uniqueness policy the core observes,
/// set at `Graph` construction and consumed by `RelUpsert` when a row list
/// carries no `rel_key_fields`.
///
/// The specification names this policy but leaves its exact semantics an
/// open question when `rel_key_fields` are absent yet parallel relationships
/// already exist; see `DESIGN.md` for the resolution this crate commits to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelUniquenessPolicy {
    /// At most one relationship of this type is assumed between a given
    /// endpoint pair; `MERGE` is emitted directly on the endpoint pattern,
    /// relying on the backend's own at-most-one guarantee.
    #[default]
    Single,
    /// Relationships of this type are keyed; `rel_key_fields` must be
    /// non-empty or compilation fails with `EmptyInput`.
    Keyed,
}
