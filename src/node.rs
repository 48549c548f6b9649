use std::alloc::{self, Layout};
use std::fmt;

/// Error returned when storage for a new tree node cannot be allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError;

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("failed to allocate tree node")
    }
}

impl std::error::Error for AllocError {}

/// A child link selector.
///
/// Descent steps and rotations address a node's subtree by direction instead
/// of naming the left/right field, so the same code handles both mirror
/// images of a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Left,
    Right,
}

impl Direction {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// The balance tag a node takes on when its subtree grows one level in
    /// this direction.
    pub(crate) fn sign(self) -> i8 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }

    /// The direction `value` descends from a node holding `pivot`.
    ///
    /// Ties route [`Direction::Left`], matching the unbalanced insertion
    /// convention; the balanced path rejects equal values before descending.
    pub(crate) fn of(value: i32, pivot: i32) -> Self {
        if value <= pivot {
            Self::Left
        } else {
            Self::Right
        }
    }
}

/// A single tree node: a value, two exclusively-owned child links and a
/// balance tag.
#[derive(Debug, Clone)]
pub struct Node {
    /// Child node pointers.
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,

    /// Height of the right subtree minus the height of the left subtree,
    /// constrained to {-1, 0, +1}.
    ///
    /// During an insertion this is a transient direction tag back-patched
    /// along the search path; once the call returns it is the exact height
    /// difference again for every node in the tree.
    balance: i8,

    value: i32,
}

impl Node {
    /// Allocate a leaf node holding `value`, surfacing allocation failure
    /// instead of aborting.
    pub(crate) fn try_new(value: i32) -> Result<Box<Self>, AllocError> {
        let layout = Layout::new::<Self>();

        // SAFETY: Node is a sized type with a non-zero-size layout.
        let ptr = unsafe { alloc::alloc(layout) }.cast::<Self>();
        if ptr.is_null() {
            return Err(AllocError);
        }

        // SAFETY: ptr is non-null, allocated with the layout of Self, and
        // uniquely owned by this function until handed to the Box.
        unsafe {
            ptr.write(Self {
                left: None,
                right: None,
                balance: 0,
                value,
            });
            Ok(Box::from_raw(ptr))
        }
    }

    /// The key stored in this node.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// The stored balance tag: height(right subtree) - height(left subtree).
    pub fn balance_factor(&self) -> i8 {
        self.balance
    }

    /// The left child, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The right child, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    pub(crate) fn child(&self, d: Direction) -> Option<&Self> {
        match d {
            Direction::Left => self.left(),
            Direction::Right => self.right(),
        }
    }

    /// The owning link slot for the child in direction `d`.
    pub(crate) fn link_mut(&mut self, d: Direction) -> &mut Option<Box<Self>> {
        match d {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }
}

/// Recursively compute the height of the subtree rooted at `n`.
///
/// An empty subtree has height -1, a single node height 0.
pub(crate) fn height(n: Option<&Node>) -> i32 {
    match n {
        Some(n) => 1 + height(n.left()).max(height(n.right())),
        None => -1,
    }
}

/// Verify the search-order invariant for the subtree rooted at `n`.
///
/// Every node's value must lie within the closed `[min, max]` range inherited
/// from its ancestors: descending left tightens the upper bound to the
/// parent's value, descending right raises the lower bound to it. Both bounds
/// stay inclusive so trees built with tie-left unbalanced insertion validate
/// too.
pub(crate) fn is_bst(n: Option<&Node>, min: i32, max: i32) -> bool {
    match n {
        Some(n) => {
            if n.value < min || n.value > max {
                return false;
            }
            is_bst(n.left(), min, n.value) && is_bst(n.right(), n.value, max)
        }
        None => true,
    }
}

/// Insert `value` into the tree rooted at `root` without rebalancing.
///
/// Ties descend left, so duplicate values accumulate in the left subtree.
/// Ancestor balance tags are not maintained; adversarial input degrades the
/// tree to a linked list. The descent is iterative so degenerate depth costs
/// time, not stack.
pub(crate) fn insert_unbalanced(
    root: &mut Option<Box<Node>>,
    value: i32,
) -> Result<(), AllocError> {
    let mut link = root;
    loop {
        match link {
            Some(node) => link = node.link_mut(Direction::of(value, node.value)),
            None => {
                *link = Some(Node::try_new(value)?);
                return Ok(());
            }
        }
    }
}

/// Insert `value` into the non-empty tree rooted at `root`, rotating if the
/// insertion pushes an ancestor out of balance tolerance.
///
/// Returns false, leaving the tree untouched, when `value` is already
/// present.
///
/// The rebalancing pivot is the deepest node on the search path whose balance
/// tag was nonzero before this insertion: every node below it on the path is
/// perfectly balanced, so the pivot is the only node the new leaf can push to
/// an effective balance of +-2. The pivot is recorded by value during the
/// descent and re-located by re-descending the same comparison path, which
/// keeps the whole walk free of aliased interior pointers.
pub(crate) fn insert_balanced(
    root: &mut Option<Box<Node>>,
    value: i32,
) -> Result<bool, AllocError> {
    // Descend to the insertion point, tracking the pivot candidate and
    // attaching the new leaf at the first empty link.
    let mut pivot = match root.as_deref() {
        Some(n) => n.value,
        None => unreachable!("balanced insertion requires a non-empty tree"),
    };

    let mut link = &mut *root;
    loop {
        match link {
            Some(node) => {
                if value == node.value {
                    // Already present: no allocation, no structural change.
                    return Ok(false);
                }
                let dir = Direction::of(value, node.value);
                if let Some(child) = node.child(dir) {
                    if child.balance != 0 {
                        pivot = child.value;
                    }
                }
                link = node.link_mut(dir);
            }
            None => {
                *link = Some(Node::try_new(value)?);
                break;
            }
        }
    }

    // Re-descend to the link owning the pivot node. The pivot lies on the
    // search path, so the comparisons that found the insertion point lead
    // straight back to it.
    let mut pivot_link = &mut *root;
    loop {
        let v = pivot_link.as_deref().unwrap().value;
        if v == pivot {
            break;
        }
        pivot_link = pivot_link
            .as_deref_mut()
            .unwrap()
            .link_mut(Direction::of(value, v));
    }

    let a = Direction::of(value, pivot);

    // Back-patch: every node strictly between the pivot and the new leaf was
    // balanced before the insertion and now leans toward it. The leaf itself
    // keeps its zero tag.
    {
        let s = pivot_link.as_deref_mut().unwrap();
        let mut p = s.link_mut(a).as_deref_mut().unwrap();
        while p.value != value {
            let dir = Direction::of(value, p.value);
            p.balance = dir.sign();
            p = p.link_mut(dir).as_deref_mut().unwrap();
        }
    }

    let tag = pivot_link.as_deref().unwrap().balance;
    if tag == 0 {
        // The subtree at the pivot grew one level but stays in tolerance.
        pivot_link.as_deref_mut().unwrap().balance = a.sign();
        return Ok(true);
    }
    if tag == -a.sign() {
        // The insertion landed on the shorter side and evened the pivot out.
        pivot_link.as_deref_mut().unwrap().balance = 0;
        return Ok(true);
    }

    debug_assert_eq!(tag, a.sign());
    rotate(pivot_link, a);

    Ok(true)
}

/// Rebalance the subtree whose root (the pivot) has an effective balance of
/// +-2 after an insertion in direction `a`.
///
/// Operates through the link that owns the pivot, so the rotated subtree
/// replaces the pivot at its parent (or as the overall root) by plain
/// assignment. Rotation is pure ownership transfer: at most three nodes'
/// links change hands.
fn rotate(link: &mut Option<Box<Node>>, a: Direction) {
    let mut s = link.take().unwrap();
    let mut r = s.link_mut(a).take().unwrap();

    let subtree = match r.balance {
        // Single rotation: r leans the same way as the pivot. r is promoted
        // and the pivot adopts r's inner subtree. Shown for `a` = Right:
        //
        //      s                  r
        //     / \                / \
        //    0   r      ->      s   2
        //       / \            / \
        //      1   2          0   1
        //
        b if b == a.sign() => {
            *s.link_mut(a) = r.link_mut(a.opposite()).take();
            s.balance = 0;
            r.balance = 0;
            *r.link_mut(a.opposite()) = Some(s);
            r
        }

        // Double rotation: r leans opposite to the pivot, so r's inner child
        // p is promoted two levels, splitting its subtrees between the pivot
        // and r. Shown for `a` = Right:
        //
        //      s                    p
        //     / \                 /   \
        //    0   r      ->       s     r
        //       / \             / \   / \
        //      p   3           0   1 2   3
        //     / \
        //    1   2
        //
        b if b == -a.sign() => {
            let mut p = r.link_mut(a.opposite()).take().unwrap();
            *r.link_mut(a.opposite()) = p.link_mut(a).take();
            *s.link_mut(a) = p.link_mut(a.opposite()).take();

            // The new tags fall out of which of p's former subtrees held the
            // freshly inserted leaf.
            match p.balance {
                b if b == a.sign() => {
                    s.balance = -a.sign();
                    r.balance = 0;
                }
                0 => {
                    // p is the new leaf itself.
                    s.balance = 0;
                    r.balance = 0;
                }
                _ => {
                    debug_assert_eq!(p.balance, -a.sign());
                    s.balance = 0;
                    r.balance = a.sign();
                }
            }
            p.balance = 0;

            *p.link_mut(a) = Some(r);
            *p.link_mut(a.opposite()) = Some(s);
            p
        }

        // The taller child of an out-of-tolerance pivot cannot be level: the
        // back-patch pass tagged every path node below the pivot.
        _ => unreachable!("rotation child is level; balance tags corrupted"),
    };

    *link = Some(subtree);
}
