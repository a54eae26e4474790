use crate::node::Declaration;
use crate::ruleset::Ruleset;
use std::fmt;
use std::rc::Rc;

/// Chain of rulesets active during evaluation, innermost first.
///
/// Pushing returns a new scope and leaves the receiver untouched, so a
/// frame lives exactly as long as the evaluation call holding it.
#[derive(Clone, Default)]
pub struct Scope {
    head: Option<Rc<Frame>>,
}

struct Frame {
    ruleset: Rc<Ruleset>,
    parent: Scope,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, ruleset: Rc<Ruleset>) -> Scope {
        Scope {
            head: Some(Rc::new(Frame {
                ruleset,
                parent: self.clone(),
            })),
        }
    }

    /// Pushes every frame of `other` on top of this scope, keeping their order.
    pub fn extend(&self, other: &Scope) -> Scope {
        let frames: Vec<&Rc<Ruleset>> = other.frames().collect();
        frames
            .into_iter()
            .rev()
            .fold(self.clone(), |scope, ruleset| scope.push(Rc::clone(ruleset)))
    }

    pub fn frames(&self) -> Frames<'_> {
        Frames {
            next: self.head.as_deref(),
        }
    }

    pub fn innermost(&self) -> Option<&Rc<Ruleset>> {
        self.head.as_ref().map(|frame| &frame.ruleset)
    }

    pub fn depth(&self) -> usize {
        self.frames().count()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Looks a variable up from the innermost frame outward.
    pub fn variable(&self, name: &str) -> Option<&Declaration> {
        self.frames().find_map(|ruleset| ruleset.variable(name))
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("depth", &self.depth())
            .finish()
    }
}

pub struct Frames<'a> {
    next: Option<&'a Frame>,
}

impl<'a> Iterator for Frames<'a> {
    type Item = &'a Rc<Ruleset>;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.next?;
        self.next = frame.parent.head.as_deref();
        Some(&frame.ruleset)
    }
}
