//! 注册表（RegistrationTable）
//!
//! 保存 “所属类型 → 绑定描述符” 的映射，每个类型至多一个描述符，
//! 重复注册会原位替换。查找时在全部兼容的描述符中选取亲和度最高者，
//! 亲和度相同时先注册者胜出，因此相同的注册顺序总得到相同的结果。
//!
use crate::binder::BindingHandle;
use crate::error::BindingResult;
use crate::target::{BindTarget, ParameterStream};
use crate::type_info::TypeInfo;
use rxbind_core::Command;
use std::fmt;
use std::rc::Rc;

/// 绑定构建函数：`(command, target, parameter) -> handle`
pub type BuildBindingFn = Rc<
    dyn Fn(
        Rc<dyn Command>,
        Rc<dyn BindTarget>,
        Option<ParameterStream>,
    ) -> BindingResult<BindingHandle>,
>;

/// 绑定描述符（注册后不可变）
#[derive(Clone)]
pub struct BindingDescriptor {
    owner: &'static TypeInfo,
    affinity: i32,
    build: BuildBindingFn,
}

impl BindingDescriptor {
    pub fn new(owner: &'static TypeInfo, affinity: i32, build: BuildBindingFn) -> Self {
        Self {
            owner,
            affinity,
            build,
        }
    }

    pub fn owner_type(&self) -> &'static TypeInfo {
        self.owner
    }

    pub fn affinity(&self) -> i32 {
        self.affinity
    }

    pub fn build(
        &self,
        command: Rc<dyn Command>,
        target: Rc<dyn BindTarget>,
        parameter: Option<ParameterStream>,
    ) -> BindingResult<BindingHandle> {
        (self.build)(command, target, parameter)
    }
}

impl fmt::Debug for BindingDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingDescriptor")
            .field("owner", &self.owner.name())
            .field("affinity", &self.affinity)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, Default)]
pub struct RegistrationTable {
    entries: Vec<BindingDescriptor>,
}

impl RegistrationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入描述符；同一所属类型已存在时原位替换并返回旧值
    pub fn insert(&mut self, descriptor: BindingDescriptor) -> Option<BindingDescriptor> {
        let position = self.entries.iter().position(|d| d.owner == descriptor.owner);
        match position {
            Some(index) => Some(std::mem::replace(&mut self.entries[index], descriptor)),
            None => {
                self.entries.push(descriptor);
                None
            }
        }
    }

    pub fn get(&self, owner: &TypeInfo) -> Option<&BindingDescriptor> {
        self.entries.iter().find(|d| d.owner == owner)
    }

    /// 兼容 `type_info` 且亲和度最高的描述符
    pub fn best_match(&self, type_info: &TypeInfo) -> Option<&BindingDescriptor> {
        self.entries
            .iter()
            .filter(|d| d.owner.is_assignable_from(type_info))
            .fold(None, |best: Option<&BindingDescriptor>, d| match best {
                Some(b) if b.affinity >= d.affinity => Some(b),
                _ => Some(d),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BindingDescriptor> {
        self.entries.iter()
    }
}
