/// Move the element at `from` to `to`, shifting the ones in between.
///
/// This is the splice a drag-and-drop gesture resolves to. Out-of-range
/// indices leave the order unchanged.
pub fn reorder<T: Clone>(list: &[T], from: usize, to: usize) -> Vec<T> {
    let mut result = list.to_vec();
    if from >= result.len() || to >= result.len() || from == to {
        return result;
    }
    let moved = result.remove(from);
    result.insert(to, moved);
    result
}
