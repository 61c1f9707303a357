use std::borrow::Cow;

use crate::{
    attributes::Attributes, constant_pool::ClassInfo, expect_cp_info, parser::Parser,
    ConstantPool, Result,
};

/// A decoded class file. Constructed in one shot by [`ClassFile::parse`] and
/// immutable afterwards; every index field keeps the 1-based pool addressing
/// of the wire format.
#[derive(Debug, Default)]
pub struct ClassFile {
    pub magic: u32,
    pub minor_version: u16,
    pub major_version: u16,
    pub constant_pool: ConstantPool,
    pub access_flags: u16,
    pub this_class: u16,
    pub super_class: u16,
    pub interfaces: Vec<u16>,
    pub fields: Vec<FieldInfo>,
    pub methods: Vec<MethodInfo>,
    pub attributes: Attributes,
}

impl ClassFile {
    /// Decodes a single class file from `bytes` and checks its structural
    /// invariants. This is the sole entry point of the crate.
    pub fn parse(bytes: &[u8]) -> Result<ClassFile> {
        Parser::new(bytes).parse()
    }

    /// The name of the class or interface this file defines, in internal
    /// form (`java/lang/Object`).
    pub fn class_name(&self) -> Result<Cow<'_, str>> {
        let ClassInfo { name_index } =
            expect_cp_info!(self.constant_pool, self.this_class, Class)?;

        let utf8 = expect_cp_info!(self.constant_pool, *name_index, Utf8)?;
        Ok(utf8.to_string_lossy())
    }

    /// The name of the direct superclass, or `None` when `super_class` is
    /// zero. Only `java/lang/Object` may legally have no superclass; that
    /// rule needs the class hierarchy and is not checked here.
    pub fn super_class_name(&self) -> Result<Option<Cow<'_, str>>> {
        if self.super_class == 0 {
            return Ok(None);
        }

        let ClassInfo { name_index } =
            expect_cp_info!(self.constant_pool, self.super_class, Class)?;

        let utf8 = expect_cp_info!(self.constant_pool, *name_index, Utf8)?;
        Ok(Some(utf8.to_string_lossy()))
    }

    pub fn field_name(&self, field: &FieldInfo) -> Result<Cow<'_, str>> {
        let utf8 = expect_cp_info!(self.constant_pool, field.name_index, Utf8)?;
        Ok(utf8.to_string_lossy())
    }

    pub fn field_descriptor(&self, field: &FieldInfo) -> Result<Cow<'_, str>> {
        let utf8 = expect_cp_info!(self.constant_pool, field.descriptor_index, Utf8)?;
        Ok(utf8.to_string_lossy())
    }

    pub fn method_name(&self, method: &MethodInfo) -> Result<Cow<'_, str>> {
        let utf8 = expect_cp_info!(self.constant_pool, method.name_index, Utf8)?;
        Ok(utf8.to_string_lossy())
    }

    pub fn method_descriptor(&self, method: &MethodInfo) -> Result<Cow<'_, str>> {
        let utf8 = expect_cp_info!(self.constant_pool, method.descriptor_index, Utf8)?;
        Ok(utf8.to_string_lossy())
    }
}

#[derive(Debug, Default)]
pub struct FieldInfo {
    pub access_flags: u16,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub attributes: Attributes,
}

#[derive(Debug, Default)]
pub struct MethodInfo {
    pub access_flags: u16,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub attributes: Attributes,
}
