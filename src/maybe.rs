use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use Maybe::{Just, Nothing};

/// An optional value
///
/// A `Maybe` is either [`Just`], holding exactly one value, or [`Nothing`],
/// holding none. Absence is a regular value rather than an error, so a
/// `Maybe` can travel through a computation without a failure channel.
///
/// Values are immutable once constructed, every combinator returns a new
/// `Maybe`. Equality is structural and delegates to the contained type.
///
/// ```rust
/// use satie::maybe::{Just, Maybe, Nothing};
///
/// fn lookup(key: &str) -> Maybe<i32> {
///     if key == "answer" {
///         Just(42)
///     } else {
///         Nothing
///     }
/// }
///
/// let value = lookup("answer").map(|x| x / 2).get_or_else(0);
/// assert_eq!(value, 21);
///
/// let missing = lookup("question").map(|x| x / 2).get_or_else(0);
/// assert_eq!(missing, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Maybe<T> {
    /// A present value
    Just(T),
    /// The absence of a value
    Nothing,
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Nothing
    }
}

impl<T> Maybe<T> {
    /// Lift a value into a `Maybe`
    pub fn of(value: T) -> Self {
        Just(value)
    }

    /// Returns `true` if the value is present
    pub fn is_just(&self) -> bool {
        matches!(self, Just(_))
    }

    /// Returns `true` if the value is absent
    pub fn is_nothing(&self) -> bool {
        matches!(self, Nothing)
    }

    /// Transform the contained value
    ///
    /// Applies `f` to the value if present. [`Nothing`] passes through
    /// untouched and `f` is never called.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Maybe<U> {
        match self {
            Just(value) => Just(f(value)),
            Nothing => Nothing,
        }
    }

    /// Transform the contained value with a function that may itself
    /// produce no value
    ///
    /// Like [map](`Maybe::map`), but flattens one level of nesting so a
    /// chain of partial lookups never builds up a `Maybe<Maybe<U>>`.
    /// On [`Nothing`], `f` is never called.
    pub fn chain<U, F: FnOnce(T) -> Maybe<U>>(self, f: F) -> Maybe<U> {
        match self {
            Just(value) => f(value),
            Nothing => Nothing,
        }
    }

    /// Unwrap the value, falling back to a default when absent
    ///
    /// This is a terminal operation, it ends the composition and leaves the
    /// `Maybe` context.
    pub fn get_or_else(self, fallback: T) -> T {
        match self {
            Just(value) => value,
            Nothing => fallback,
        }
    }

    /// Fallback combinator
    ///
    /// Keeps `self` if the value is present, otherwise yields `other`.
    /// [`Nothing`] is the right identity: `m.alt(Nothing)` is `m` for any
    /// `m`, and `Nothing.alt(m)` is `m`.
    pub fn alt(self, other: Maybe<T>) -> Maybe<T> {
        match self {
            Just(value) => Just(value),
            Nothing => other,
        }
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => Just(value),
            None => Nothing,
        }
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(maybe: Maybe<T>) -> Self {
        match maybe {
            Just(value) => Some(value),
            Nothing => None,
        }
    }
}

impl<T: Serialize> Serialize for Maybe<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Just(value) => serializer.serialize_some(value),
            Nothing => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Maybe<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Maybe::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_lifts_a_value() {
        assert_eq!(Maybe::of(1), Just(1));
        assert_eq!(Maybe::<i32>::default(), Nothing);
    }

    #[test]
    fn it_maps_over_a_present_value() {
        assert_eq!(Just(2).map(|x| x + 1), Just(3));
    }

    #[test]
    fn it_skips_the_function_on_nothing() {
        let mapped = Nothing::<i32>.map(|_| unreachable!("map must not be called on Nothing"));
        assert_eq!(mapped, Nothing::<i32>);
    }

    #[test]
    fn it_flattens_nested_lookups_with_chain() {
        fn half(x: i32) -> Maybe<i32> {
            if x % 2 == 0 {
                Just(x / 2)
            } else {
                Nothing
            }
        }

        assert_eq!(Just(8).chain(half), Just(4));
        assert_eq!(Just(3).chain(half), Nothing);
        assert_eq!(Nothing.chain(half), Nothing);
    }

    #[test]
    fn it_keeps_chain_associative() {
        fn half(x: i32) -> Maybe<i32> {
            if x % 2 == 0 {
                Just(x / 2)
            } else {
                Nothing
            }
        }

        fn pred(x: i32) -> Maybe<i32> {
            if x > 0 {
                Just(x - 1)
            } else {
                Nothing
            }
        }

        for m in [Just(8), Just(3), Just(0), Nothing] {
            assert_eq!(m.chain(half).chain(pred), m.chain(|x| half(x).chain(pred)));
        }
    }

    #[test]
    fn it_unwraps_with_get_or_else() {
        assert_eq!(Just(1).get_or_else(0), 1);
        assert_eq!(Nothing.get_or_else(0), 0);
    }

    #[test]
    fn it_prefers_the_present_value_on_alt() {
        assert_eq!(Just(1).alt(Just(2)), Just(1));
        assert_eq!(Just(1).alt(Nothing), Just(1));
        assert_eq!(Nothing.alt(Just(2)), Just(2));
        assert_eq!(Nothing::<i32>.alt(Nothing), Nothing::<i32>);
    }

    #[test]
    fn it_keeps_alt_associative() {
        for a in [Just(1), Nothing] {
            for b in [Just(2), Nothing] {
                for c in [Just(3), Nothing] {
                    assert_eq!(a.alt(b).alt(c), a.alt(b.alt(c)));
                }
            }
        }
    }

    #[test]
    fn it_converts_from_and_into_option() {
        assert_eq!(Maybe::from(Some(1)), Just(1));
        assert_eq!(Maybe::from(None::<i32>), Nothing);
        assert_eq!(Option::<i32>::from(Just(1)), Some(1));
        assert_eq!(Option::<i32>::from(Nothing::<i32>), None);
    }

    #[test]
    fn it_serializes_like_an_optional_field() {
        assert_eq!(serde_json::to_value(Just(5)).unwrap(), json!(5));
        assert_eq!(serde_json::to_value(Nothing::<i32>).unwrap(), json!(null));
    }

    #[test]
    fn it_deserializes_null_as_nothing() {
        assert_eq!(serde_json::from_value::<Maybe<i32>>(json!(5)).unwrap(), Just(5));
        assert_eq!(
            serde_json::from_value::<Maybe<i32>>(json!(null)).unwrap(),
            Nothing
        );
    }
}
