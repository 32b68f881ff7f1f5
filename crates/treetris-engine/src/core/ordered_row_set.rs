use std::cmp::Ordering;

type Link = Option<Box<RowNode>>;

#[derive(Debug, Clone)]
struct RowNode {
    value: i32,
    /// Number of values stored in the subtree rooted at this node.
    count: usize,
    left: Link,
    right: Link,
}

impl RowNode {
    fn leaf(value: i32) -> Self {
        Self {
            value,
            count: 1,
            left: None,
            right: None,
        }
    }
}

/// Ordered set of the occupied row indices of a single column.
///
/// Stored as a plain binary search tree keyed by row value. Every node keeps
/// the size of its own subtree, so [`count`](Self::count) is O(1) and stays
/// exact across insertions and removals.
///
/// The main query is [`upper_bound`](Self::upper_bound): the nearest occupied
/// row strictly below a given row (rows grow downward), which is what a
/// falling piece asks for every tick.
///
/// # Example
///
/// ```
/// use treetris_engine::OrderedRowSet;
///
/// let mut rows = OrderedRowSet::new();
/// for y in [10, 7, 9, 6, 4, 15] {
///     rows.insert(y);
/// }
///
/// assert_eq!(rows.upper_bound(6), Some(7));
/// assert_eq!(rows.upper_bound(15), None);
/// assert_eq!(rows.count(), 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OrderedRowSet {
    root: Link,
}

impl OrderedRowSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None }
    }

    /// Number of values in the set.
    #[must_use]
    pub fn count(&self) -> usize {
        self.root.as_ref().map_or(0, |node| node.count)
    }

    /// Returns `true` if the set holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns `true` if `value` is stored in the set.
    #[must_use]
    pub fn contains(&self, value: i32) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Inserts `value`, returning `false` if it was already present.
    pub fn insert(&mut self, value: i32) -> bool {
        insert_into(&mut self.root, value)
    }

    /// Removes `value`, returning `false` if it was not present.
    ///
    /// A node with two children takes over the value of its in-order
    /// successor, whose own node is then spliced out of the right subtree.
    pub fn remove(&mut self, value: i32) -> bool {
        remove_from(&mut self.root, value)
    }

    /// Returns the smallest stored value strictly greater than `value`.
    ///
    /// Runs in O(depth): whenever the current node is greater than `value`
    /// it becomes the best candidate so far and the search continues left
    /// looking for a smaller one.
    #[must_use]
    pub fn upper_bound(&self, value: i32) -> Option<i32> {
        let mut best = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if node.value > value {
                best = Some(node.value);
                current = node.left.as_deref();
            } else {
                current = node.right.as_deref();
            }
        }
        best
    }

    /// Returns an iterator over every stored value.
    ///
    /// The order is unspecified (currently pre-order).
    pub fn values(&self) -> Values<'_> {
        Values {
            stack: self.root.as_deref().into_iter().collect(),
        }
    }
}

fn insert_into(link: &mut Link, value: i32) -> bool {
    let Some(node) = link.as_deref_mut() else {
        *link = Some(Box::new(RowNode::leaf(value)));
        return true;
    };
    let inserted = match value.cmp(&node.value) {
        Ordering::Less => insert_into(&mut node.left, value),
        Ordering::Greater => insert_into(&mut node.right, value),
        Ordering::Equal => false,
    };
    if inserted {
        node.count += 1;
    }
    inserted
}

fn remove_from(link: &mut Link, value: i32) -> bool {
    let Some(node) = link.as_deref_mut() else {
        return false;
    };
    match value.cmp(&node.value) {
        Ordering::Less => {
            if !remove_from(&mut node.left, value) {
                return false;
            }
        }
        Ordering::Greater => {
            if !remove_from(&mut node.right, value) {
                return false;
            }
        }
        Ordering::Equal => {
            if node.left.is_none() {
                let right = node.right.take();
                *link = right;
                return true;
            }
            if node.right.is_none() {
                let left = node.left.take();
                *link = left;
                return true;
            }
            if let Some(successor) = take_min(&mut node.right) {
                node.value = successor;
            }
        }
    }
    node.count -= 1;
    true
}

/// Detaches the minimum node of the subtree and returns its value.
fn take_min(link: &mut Link) -> Option<i32> {
    let node = link.as_deref_mut()?;
    if node.left.is_some() {
        let min = take_min(&mut node.left);
        node.count -= 1;
        return min;
    }
    let min = node.value;
    let right = node.right.take();
    *link = right;
    Some(min)
}

/// Iterator returned by [`OrderedRowSet::values`].
#[derive(Debug, Clone)]
pub struct Values<'a> {
    stack: Vec<&'a RowNode>,
}

impl Iterator for Values<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.left.as_deref());
        self.stack.extend(node.right.as_deref());
        Some(node.value)
    }
}
