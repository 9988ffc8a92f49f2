//! 可释放资源（Disposable）
//!
//! 订阅与绑定统一以“释放句柄”的形式返回给调用方：
//! - `Disposable`：幂等的释放协议，重复释放为空操作；
//! - `Subscription`：持有一次性的退订动作，离开作用域（drop）时自动释放；
//! - `CompositeDisposable`：将多个句柄组合为一个整体，按加入顺序一次性释放。
//!
use std::cell::{Cell, RefCell};
use std::fmt;

/// 可释放资源
pub trait Disposable {
    /// 释放资源；重复调用不产生任何副作用
    fn dispose(&self);

    /// 是否已释放
    fn is_disposed(&self) -> bool;
}

impl<D: Disposable + ?Sized> Disposable for Box<D> {
    fn dispose(&self) {
        (**self).dispose();
    }

    fn is_disposed(&self) -> bool {
        (**self).is_disposed()
    }
}

/// 单个订阅的释放句柄
///
/// 释放动作最多执行一次；句柄被 drop 时等同于调用 `dispose`。
pub struct Subscription {
    action: RefCell<Option<Box<dyn FnOnce()>>>,
    disposed: Cell<bool>,
}

impl Subscription {
    pub fn new(action: impl FnOnce() + 'static) -> Self {
        Self {
            action: RefCell::new(Some(Box::new(action))),
            disposed: Cell::new(false),
        }
    }

    /// 无需任何退订动作的句柄（例如同步完成的序列）
    pub fn empty() -> Self {
        Self {
            action: RefCell::new(None),
            disposed: Cell::new(false),
        }
    }
}

impl Disposable for Subscription {
    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        // 先取出再执行，避免退订动作重入时仍持有借用
        let action = self.action.borrow_mut().take();
        if let Some(action) = action {
            action();
        }
    }

    fn is_disposed(&self) -> bool {
        self.disposed.get()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("disposed", &self.disposed.get())
            .finish()
    }
}

/// 组合释放句柄
#[derive(Default)]
pub struct CompositeDisposable {
    items: RefCell<Vec<Box<dyn Disposable>>>,
    disposed: Cell<bool>,
}

impl CompositeDisposable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入一个句柄；若组合已释放，则立即释放该句柄
    pub fn add(&self, item: Box<dyn Disposable>) {
        if self.disposed.get() {
            item.dispose();
            return;
        }
        self.items.borrow_mut().push(item);
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl FromIterator<Box<dyn Disposable>> for CompositeDisposable {
    fn from_iter<I: IntoIterator<Item = Box<dyn Disposable>>>(iter: I) -> Self {
        Self {
            items: RefCell::new(iter.into_iter().collect()),
            disposed: Cell::new(false),
        }
    }
}

impl Disposable for CompositeDisposable {
    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        let items = std::mem::take(&mut *self.items.borrow_mut());
        for item in &items {
            item.dispose();
        }
    }

    fn is_disposed(&self) -> bool {
        self.disposed.get()
    }
}

impl Drop for CompositeDisposable {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for CompositeDisposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeDisposable")
            .field("len", &self.len())
            .field("disposed", &self.disposed.get())
            .finish()
    }
}
