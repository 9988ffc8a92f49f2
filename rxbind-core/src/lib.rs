//! 响应式绑定基础库（rxbind-core）
//!
//! 提供命令绑定所依赖的最小响应式构件，全部为单线程、同步投递：
//! - 可释放资源（`disposable`）：`Disposable`、`Subscription`、`CompositeDisposable`；
//! - 可观察序列（`observable`）：`Observable`、`Subject`、`Just`；
//! - 命令抽象（`command`）：`Command`、`Parameter` 与闭包实现 `RelayCommand`。
//!
//! 所有回调都在触发它的线程上同步执行，不做任何调度或加锁，
//! 调用方需保证事件、通知与属性写入位于同一逻辑线程（通常是 UI 主线程）。
//!
pub mod command;
pub mod disposable;
pub mod observable;

pub use command::{Command, Parameter, RelayCommand, parameter, parameter_as};
pub use disposable::{CompositeDisposable, Disposable, Subscription};
pub use observable::{Just, Observable, ObservableExt, Observer, Subject};
