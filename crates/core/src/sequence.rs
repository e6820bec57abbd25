//! Sequence fields: copy-in assignment and append.
//!
//! A value object owns every sequence it stores. Assignment always builds a new
//! `Vec` from the caller's elements, so the caller's collection is neither
//! retained nor touched, and later changes on either side stay invisible to the
//! other.
//!
//! Reads hand out `&[T]`. A shared borrow cannot mutate the stored vector, so
//! there is no copy on the way out; callers that want their own vector call
//! `to_vec()`.

/// Copy `source` into a freshly owned sequence.
///
/// `None` stays `None`: an absent source never becomes an empty sequence.
pub fn copy_in<I, T>(source: Option<I>) -> Option<Vec<T>>
where
    I: IntoIterator,
    I::Item: Into<T>,
{
    source.map(|values| values.into_iter().map(Into::into).collect())
}

/// Append `values` to a sequence field in argument order.
///
/// An absent field is first initialised with a vector sized for the incoming
/// values. Appending nothing to an absent field still makes it present and
/// empty.
pub fn append<I, T>(field: &mut Option<Vec<T>>, values: I)
where
    I: IntoIterator,
    I::Item: Into<T>,
{
    let values = values.into_iter();
    let target = field.get_or_insert_with(|| Vec::with_capacity(values.size_hint().0));
    target.extend(values.map(Into::into));
}
