use thiserror::Error;

use crate::constant_pool::CpInfo;

#[derive(Error, Debug, PartialEq)]
pub enum ClassFileError {
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("invalid magic number: 0x{0:x}")]
    InvalidMagicNumber(u32),
    #[error("invalid constant pool size")]
    InvalidConstantPoolSize,
    #[error("invalid constant pool tag: {0}")]
    InvalidConstantPoolTag(u8),
    #[error("invalid access flags: 0x{0:x}")]
    InvalidAccessFlags(u16),
    #[error("interface must have abstract flag set")]
    InterfaceMissingAbstract,
    #[error("interface must not have final flag set")]
    InterfaceWithFinal,
    #[error("interface must not have super flag set")]
    InterfaceWithSuper,
    #[error("interface must not have enum flag set")]
    InterfaceWithEnum,
    #[error("class must not have both final and abstract flags set")]
    ClassFinalAndAbstract,
    #[error("class must not have annotation flag set")]
    ClassWithAnnotation,
    #[error("invalid this class index: {0}")]
    InvalidThisClassIndex(u16),
    #[error("this class should be a CONSTANT_Class_info")]
    ThisClassNotClassInfo,
    #[error("constant pool index out of bounds: {0}")]
    ConstantPoolIndexOutOfBounds(u16),
    #[error("expected {0}, found {1:?}")]
    UnexpectedConstantPoolEntry(&'static str, CpInfo),
}
