use super::*;
use crate::CommonizerError;

fn equality() -> StandardCommonizer<Associative<Equality, i32>> {
    StandardCommonizer::new(Associative::new(Equality))
}

/// Keeps the longest common prefix of the strings seen.
struct CommonPrefix;

impl BatchCommonizer<String, String> for CommonPrefix {
    fn commonize(&self, values: &[&String]) -> Option<String> {
        let (first, rest) = values.split_first()?;
        let mut prefix = first.as_str();
        for value in rest {
            let len = prefix
                .chars()
                .zip(value.chars())
                .take_while(|(a, b)| a == b)
                .count();
            prefix = &prefix[..len];
        }
        (!prefix.is_empty()).then(|| prefix.to_owned())
    }
}

/// Present wins over absent; two present values must match.
struct PresentWins;

impl NullableAssociativeCommonizer<u8> for PresentWins {
    fn commonize(&self, first: Option<&u8>, second: Option<&u8>) -> Option<u8> {
        match (first, second) {
            (Some(a), Some(b)) => Some((*a).max(*b)),
            (Some(v), None) | (None, Some(v)) => Some(*v),
            (None, None) => None,
        }
    }
}

// === StandardCommonizer lifecycle ===

#[test]
fn fresh_commonizer_is_empty() {
    let commonizer = equality();
    assert_eq!(commonizer.state(), CommonizerState::Empty);
    assert!(matches!(
        commonizer.result(),
        Err(CommonizerError::IllegalState {
            reason: "result read before any value",
            ..
        })
    ));
}

#[test]
fn single_value_is_its_own_projection() {
    let mut commonizer = equality();
    assert!(commonizer.commonize_with(&7));
    assert_eq!(commonizer.state(), CommonizerState::Accumulating);
    assert_eq!(commonizer.result(), Ok(7));
}

#[test]
fn mismatch_is_terminal() {
    let mut commonizer = equality();
    assert!(commonizer.commonize_with(&1));
    assert!(!commonizer.commonize_with(&2));
    assert_eq!(commonizer.state(), CommonizerState::Failed);

    // Even a value equal to the first one cannot revive it.
    assert!(!commonizer.commonize_with(&1));
    assert_eq!(commonizer.state(), CommonizerState::Failed);
    assert!(commonizer.result().is_err());
}

#[test]
fn commonize_all_maps_failure_to_absent() {
    assert_eq!(commonize_all(&mut equality(), &[3, 3, 3]), Ok(Some(3)));
    assert_eq!(commonize_all(&mut equality(), &[3, 4, 3]), Ok(None));
    assert_eq!(commonize_all(&mut equality(), &[] as &[i32]), Ok(None));
}

// === Associative folds ===

#[test]
fn associative_fold_identity_and_empty() {
    assert_eq!(Equality.commonize_all(&[5]), Some(5));
    assert_eq!(Equality.commonize_all(&[] as &[i32]), None);
    assert_eq!(Equality.commonize_all(&[5, 5, 6]), None);
}

#[test]
fn nullable_fold_never_fails() {
    assert_eq!(PresentWins.commonize_all([None, Some(&2), None, Some(&5)]), Some(5));
    assert_eq!(PresentWins.commonize_all([None, None]), None);
    assert_eq!(PresentWins.commonize_all(std::iter::empty()), None);
}

// === Batch adapter ===

#[test]
fn prefix_adapter_reruns_batch() {
    let mut commonizer = StandardCommonizer::new(Prefix::new(CommonPrefix));
    assert!(commonizer.commonize_with(&"platform_int".to_owned()));
    assert_eq!(commonizer.result(), Ok("platform_int".to_owned()));
    assert!(commonizer.commonize_with(&"platform_uint".to_owned()));
    assert_eq!(commonizer.result(), Ok("platform_".to_owned()));
    assert!(!commonizer.commonize_with(&"long".to_owned()));
    assert_eq!(commonizer.state(), CommonizerState::Failed);
}

// === Lists ===

#[test]
fn list_commonizes_each_position() {
    let mut list = ListCommonizer::new(equality);
    assert!(list.commonize_with(&[1, 2, 3][..]));
    assert!(list.commonize_with(&[1, 2, 3][..]));
    assert_eq!(list.result(), Ok(vec![1, 2, 3]));
}

#[test]
fn list_fails_on_length_mismatch() {
    let mut list = ListCommonizer::new(equality);
    assert!(list.commonize_with(&[1, 2][..]));
    assert!(!list.commonize_with(&[1, 2, 3][..]));
    assert!(!list.commonize_with(&[1, 2][..]));
    assert!(list.result().is_err());
}

#[test]
fn list_fails_on_element_mismatch() {
    let mut list = ListCommonizer::new(equality);
    assert!(list.commonize_with(&[1, 2][..]));
    assert!(!list.commonize_with(&[1, 9][..]));
}

#[test]
fn empty_lists_commonize_to_empty() {
    let mut list = ListCommonizer::new(equality);
    assert!(list.commonize_with(&[][..]));
    assert!(list.commonize_with(&[][..]));
    assert_eq!(list.result(), Ok(vec![]));
}

#[test]
fn positional_batch_form() {
    let a = [1, 2];
    let b = [1, 2];
    let c = [1, 3];
    let same = |column: &[&i32]| Equality.commonize_all(column.iter().copied());

    assert_eq!(commonize_positionally(&[&a, &b], same), Some(vec![1, 2]));
    assert_eq!(commonize_positionally(&[&a, &c], same), None);
    assert_eq!(commonize_positionally(&[&a, &a[..1]], same), None);
}
