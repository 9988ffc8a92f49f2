//! 命令（Command）
//!
//! 一个命令由“执行动作”与“是否可执行”谓词组成，并通过
//! `can_execute_changed` 通知可执行状态可能发生了变化。
//! 命令参数是可空的动态类型值（[`Parameter`]），由绑定层传入。
//!
use crate::observable::{Observable, Subject};
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// 命令参数：`None` 表示空参数
pub type Parameter = Option<Rc<dyn Any>>;

/// 构造一个非空参数
pub fn parameter<T: Any>(value: T) -> Parameter {
    Some(Rc::new(value))
}

/// 尝试以具体类型读取参数
pub fn parameter_as<T: Any>(parameter: &Parameter) -> Option<&T> {
    parameter.as_deref().and_then(|p| p.downcast_ref::<T>())
}

/// 命令抽象
pub trait Command {
    fn can_execute(&self, parameter: &Parameter) -> bool;

    fn execute(&self, parameter: &Parameter);

    /// 可执行状态变化通知；每次通知后订阅方应重新调用 `can_execute`
    fn can_execute_changed(&self) -> &dyn Observable<()>;
}

type ExecuteFn = Box<dyn Fn(&Parameter)>;
type CanExecuteFn = Box<dyn Fn(&Parameter) -> bool>;

/// 基于闭包的命令实现
///
/// ```
/// use rxbind_core::{Command, RelayCommand};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let runs = Rc::new(Cell::new(0));
/// let cmd = {
///     let runs = runs.clone();
///     RelayCommand::new(move |_| runs.set(runs.get() + 1))
/// };
///
/// assert!(cmd.can_execute(&None));
/// cmd.execute(&None);
/// assert_eq!(runs.get(), 1);
/// ```
pub struct RelayCommand {
    execute: ExecuteFn,
    can_execute: CanExecuteFn,
    can_execute_changed: Subject<()>,
}

impl RelayCommand {
    /// 始终可执行的命令
    pub fn new(execute: impl Fn(&Parameter) + 'static) -> Self {
        Self {
            execute: Box::new(execute),
            can_execute: Box::new(|_| true),
            can_execute_changed: Subject::new(),
        }
    }

    /// 替换可执行谓词
    pub fn with_can_execute(mut self, can_execute: impl Fn(&Parameter) -> bool + 'static) -> Self {
        self.can_execute = Box::new(can_execute);
        self
    }

    /// 通知订阅方可执行状态需要重新计算
    pub fn raise_can_execute_changed(&self) {
        self.can_execute_changed.emit(&());
    }
}

impl Command for RelayCommand {
    fn can_execute(&self, parameter: &Parameter) -> bool {
        (self.can_execute)(parameter)
    }

    fn execute(&self, parameter: &Parameter) {
        (self.execute)(parameter)
    }

    fn can_execute_changed(&self) -> &dyn Observable<()> {
        &self.can_execute_changed
    }
}

impl fmt::Debug for RelayCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayCommand")
            .field("can_execute_changed", &self.can_execute_changed)
            .finish_non_exhaustive()
    }
}
