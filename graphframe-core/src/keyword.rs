/// Define a sorted reserved-keyword table, matched via binary search.
///
/// Modeled on `usql-core`'s `define_keyword!`/`kw_def!` pair, trimmed down
/// for a crate that only ever speaks one backend dialect: there is no
/// generic `Keyword` enum or `KeywordDef` trait here, just the sorted string
/// table the teacher's macro ultimately produced.
///
/// **NOTE**: entries must be given in alphabetical order — `is_reserved`
/// binary-searches the generated array and an unsorted table silently
/// breaks lookups.
macro_rules! define_keywords {
    ($name:ident => { $($keyword:ident),* $(,)? }) => {
        #[doc(hidden)]
        #[allow(dead_code)]
        struct $name;

        impl $name {
            /// All reserved words, sorted ascending.
            const WORDS: &'static [&'static str] = &[$(stringify!($keyword)),*];
        }
    };
}

define_keywords! {
    CypherKeywordTable => {
        AND,
        AS,
        ASC,
        BY,
        CALL,
        CASE,
        CREATE,
        DELETE,
        DESC,
        DETACH,
        ELSE,
        END,
        EXISTS,
        FALSE,
        IN,
        IS,
        LIMIT,
        MATCH,
        MERGE,
        NOT,
        NULL,
        OPTIONAL,
        OR,
        ORDER,
        REMOVE,
        RETURN,
        SET,
        SKIP,
        THEN,
        TRUE,
        UNION,
        UNWIND,
        WHEN,
        WHERE,
        WITH,
        XOR,
        YIELD,
    }
}

/// The reserved-word table for the backend's query language.
///
/// Any identifier that case-insensitively matches one of these words must be
/// backtick-quoted when emitted, even if it otherwise matches the plain
/// identifier pattern.
pub struct CypherKeyword;

impl CypherKeyword {
    /// Returns `true` if `word` (case-insensitively) names a reserved
    /// keyword of the backend's query language.
    pub fn is_reserved(word: &str) -> bool {
        let upper = word.to_ascii_uppercase();
        CypherKeywordTable::WORDS.binary_search(&upper.as_str()).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted() {
        let mut sorted = CypherKeywordTable::WORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(CypherKeywordTable::WORDS, sorted.as_slice());
    }

    #[test]
    fn recognizes_reserved_words_case_insensitively() {
        assert!(CypherKeyword::is_reserved("MATCH"));
        assert!(CypherKeyword::is_reserved("match"));
        assert!(CypherKeyword::is_reserved("Return"));
    }

    #[test]
    fn does_not_flag_ordinary_property_names() {
        assert!(!CypherKeyword::is_reserved("name"));
        assert!(!CypherKeyword::is_reserved("since"));
        assert!(!CypherKeyword::is_reserved("city"));
    }
}
