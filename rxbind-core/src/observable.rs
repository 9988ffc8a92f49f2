//! 可观察序列（Observable）
//!
//! 单线程、同步、按顺序投递的最小推模型：
//! - `Observable`：订阅协议，返回 `Subscription` 作为退订句柄；
//! - `Subject`：多播热序列，由宿主调用 `emit` 推送值（原生事件、状态变更通知等）；
//! - `Just`：订阅时同步推送一个常量值。
//!
use crate::disposable::Subscription;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// 观察者回调
pub type Observer<T> = Rc<dyn Fn(&T)>;

/// 可观察序列
pub trait Observable<T> {
    /// 订阅序列；返回的句柄被释放后，观察者不再收到任何值
    fn subscribe(&self, observer: Observer<T>) -> Subscription;
}

impl<T, O: Observable<T> + ?Sized> Observable<T> for Rc<O> {
    fn subscribe(&self, observer: Observer<T>) -> Subscription {
        (**self).subscribe(observer)
    }
}

/// 以闭包直接订阅的便捷扩展
pub trait ObservableExt<T>: Observable<T> {
    fn observe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        self.subscribe(Rc::new(f))
    }
}

impl<T, O: Observable<T> + ?Sized> ObservableExt<T> for O {}

struct Slot<T> {
    id: u64,
    active: Rc<Cell<bool>>,
    observer: Observer<T>,
}

struct SubjectState<T> {
    next_id: u64,
    slots: Vec<Slot<T>>,
}

/// 多播序列
///
/// 克隆得到的是同一序列的另一个句柄。投递期间不持有内部借用，
/// 观察者可以在回调中订阅、退订或再次 `emit`；投递中途被退订的观察者不会再被调用。
pub struct Subject<T> {
    inner: Rc<RefCell<SubjectState<T>>>,
}

impl<T: 'static> Subject<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SubjectState {
                next_id: 0,
                slots: Vec::new(),
            })),
        }
    }

    /// 按订阅顺序向当前全部观察者推送
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<(Rc<Cell<bool>>, Observer<T>)> = self
            .inner
            .borrow()
            .slots
            .iter()
            .map(|s| (s.active.clone(), s.observer.clone()))
            .collect();

        trace!(observers = snapshot.len(), "subject emit");

        for (active, observer) in snapshot {
            if active.get() {
                observer(value);
            }
        }
    }

    pub fn observer_count(&self) -> usize {
        self.inner.borrow().slots.len()
    }
}

impl<T: 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("observers", &self.inner.borrow().slots.len())
            .finish()
    }
}

impl<T: 'static> Observable<T> for Subject<T> {
    fn subscribe(&self, observer: Observer<T>) -> Subscription {
        let active = Rc::new(Cell::new(true));
        let id = {
            let mut state = self.inner.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.slots.push(Slot {
                id,
                active: active.clone(),
                observer,
            });
            id
        };

        // 退订句柄只持有弱引用，序列本身先被销毁时退订为空操作
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            active.set(false);
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().slots.retain(|s| s.id != id);
            }
        })
    }
}

/// 订阅时同步推送单个常量值的序列
#[derive(Clone, Debug)]
pub struct Just<T> {
    value: T,
}

impl<T> Just<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T> Observable<T> for Just<T> {
    fn subscribe(&self, observer: Observer<T>) -> Subscription {
        observer(&self.value);
        Subscription::empty()
    }
}
