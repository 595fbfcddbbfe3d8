use crate::Reflect;

/// A collection of distinct items.
///
/// Sets are read-only for path access: an index selects the n-th item in
/// iteration order.
pub trait Set: Reflect {
    fn len(&self) -> usize;

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
