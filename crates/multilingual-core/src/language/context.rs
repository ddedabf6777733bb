use super::{LanguageCode, Languages};
use crate::Result;

use std::{
    cell::{Cell, RefCell},
    future::Future,
};

/// Per-request language state: the caller's ambient locale and the language
/// lock.
#[derive(Debug, Default, Clone)]
pub(super) struct LanguageContext {
    pub(super) locale: Option<String>,
    pub(super) lock: Option<LanguageCode>,
}

tokio::task_local! {
    static TASK_CONTEXT: RefCell<LanguageContext>;
}

thread_local! {
    static THREAD_CONTEXT: RefCell<LanguageContext> = RefCell::new(LanguageContext::default());
    static WARNED: Cell<bool> = const { Cell::new(false) };
}

/// Runs `f` against the language context of the current execution context.
///
/// Inside [`scope`] that is the task-local context, which follows the task
/// across worker threads. Outside of it, each thread has its own. Async code
/// must run inside [`scope`]: on a multi-thread runtime the thread-local
/// context belongs to the worker, not the task, and is shared by every task
/// the worker polls.
pub(super) fn with_context<R>(f: impl FnOnce(&mut LanguageContext) -> R) -> R {
    if in_scope() {
        return TASK_CONTEXT.with(|cx| f(&mut cx.borrow_mut()));
    }

    if tokio::runtime::Handle::try_current().is_ok() && !WARNED.replace(true) {
        tracing::warn!(
            "language context used from an async runtime outside `language::scope`; \
             falling back to the worker thread's context"
        );
    }

    THREAD_CONTEXT.with(|cx| f(&mut cx.borrow_mut()))
}

/// Returns `true` inside [`scope`] or [`sync_scope`].
pub fn in_scope() -> bool {
    TASK_CONTEXT.try_with(|_| ()).is_ok()
}

/// Runs `fut` with a fresh language context.
///
/// Call this at request boundaries. Locks and locales set inside the future
/// are discarded when it completes and are never observed by other tasks.
pub async fn scope<F: Future>(fut: F) -> F::Output {
    TASK_CONTEXT
        .scope(RefCell::new(LanguageContext::default()), fut)
        .await
}

/// Synchronous variant of [`scope`].
pub fn sync_scope<R>(f: impl FnOnce() -> R) -> R {
    TASK_CONTEXT.sync_scope(RefCell::new(LanguageContext::default()), f)
}

/// Sets the caller's ambient locale.
///
/// The locale does not have to be configured; [`Languages::active_language`]
/// maps it to a configured code.
pub fn activate(locale: impl Into<String>) {
    let locale = locale.into();
    with_context(|cx| cx.locale = Some(locale));
}

/// Clears the caller's ambient locale.
pub fn deactivate() {
    with_context(|cx| cx.locale = None);
}

pub fn current_locale() -> Option<String> {
    with_context(|cx| cx.locale.clone())
}

/// Restores the previous language lock when dropped.
///
/// Created by [`Languages::lock_scoped`]. Locks do not stack; the guard saves
/// and restores the previous one.
#[derive(Debug)]
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct LockGuard {
    previous: Option<LanguageCode>,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        with_context(|cx| cx.lock = previous);
    }
}

impl Languages {
    /// Pins the active language and disables fallback for the current
    /// execution context.
    ///
    /// The last lock wins. Fails with an invalid language error when `code`
    /// is not configured.
    pub fn lock(&self, code: &str) -> Result<()> {
        let code = self.validate(code)?;
        tracing::debug!(language = %code, "language lock");
        with_context(|cx| cx.lock = Some(code));
        Ok(())
    }

    /// Clears the language lock of the current execution context.
    pub fn release(&self) {
        tracing::debug!("language lock released");
        with_context(|cx| cx.lock = None);
    }

    /// Locks `code` until the returned guard is dropped.
    pub fn lock_scoped(&self, code: &str) -> Result<LockGuard> {
        let code = self.validate(code)?;
        let previous = with_context(|cx| cx.lock.replace(code));
        Ok(LockGuard { previous })
    }

    /// Returns the locked language, if any.
    pub fn locked(&self) -> Option<LanguageCode> {
        with_context(|cx| cx.lock.clone())
    }
}
