//! Ordered middleware storage for routes.

use std::slice::Iter;

use crate::route::reference::MiddlewareRef;

/// An ordered sequence of middleware references. Duplicates are allowed.
#[derive(Debug, Clone, Default)]
pub struct MiddlewareStack {
    entries: Vec<MiddlewareRef>,
}

impl MiddlewareStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole sequence.
    pub fn set_all<I>(&mut self, middlewares: I)
    where
        I: IntoIterator,
        I::Item: Into<MiddlewareRef>,
    {
        self.entries = middlewares.into_iter().map(Into::into).collect();
    }

    /// The current sequence, in order.
    pub fn all(&self) -> &[MiddlewareRef] {
        &self.entries
    }

    pub fn iter(&self) -> Iter<'_, MiddlewareRef> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Types that own a [`MiddlewareStack`].
pub trait MiddlewareAware {
    fn middleware_stack(&self) -> &MiddlewareStack;

    fn middleware_stack_mut(&mut self) -> &mut MiddlewareStack;

    /// The middleware sequence, in order.
    fn middlewares(&self) -> &[MiddlewareRef] {
        self.middleware_stack().all()
    }

    /// Replace the middleware sequence.
    fn set_middlewares<I>(&mut self, middlewares: I)
    where
        I: IntoIterator,
        I::Item: Into<MiddlewareRef>,
        Self: Sized,
    {
        self.middleware_stack_mut().set_all(middlewares);
    }
}
