use crate::{constant_pool::CpInfo, AccessFlags, ClassFile, ClassFileError, Result};

const MAGIC_NUMBER: u32 = 0xCAFEBABE;

/// Structural checks over a freshly decoded class file. Everything here is
/// local to one file; checks that need other classes (the superclass chain,
/// descriptor resolution) belong to a verifier built on top.
impl ClassFile {
    pub fn validate(&self) -> Result<()> {
        self.validate_magic_number()?;
        self.validate_access_flags()?;
        self.validate_this_class()
    }

    pub fn validate_magic_number(&self) -> Result<()> {
        if self.magic != MAGIC_NUMBER {
            return Err(ClassFileError::InvalidMagicNumber(self.magic));
        }

        Ok(())
    }

    /// Checks the class-level flag rules as a sequence of guards, each with
    /// its own error so callers can tell which rule broke.
    pub fn validate_access_flags(&self) -> Result<()> {
        let Some(flags) = AccessFlags::from_bits(self.access_flags) else {
            return Err(ClassFileError::InvalidAccessFlags(self.access_flags));
        };

        // An interface is implicitly abstract and must not carry the
        // class-only modifiers.
        if flags.contains(AccessFlags::INTERFACE) {
            if !flags.contains(AccessFlags::ABSTRACT) {
                return Err(ClassFileError::InterfaceMissingAbstract);
            }

            if flags.contains(AccessFlags::FINAL) {
                return Err(ClassFileError::InterfaceWithFinal);
            }

            if flags.contains(AccessFlags::SUPER) {
                return Err(ClassFileError::InterfaceWithSuper);
            }

            if flags.contains(AccessFlags::ENUM) {
                return Err(ClassFileError::InterfaceWithEnum);
            }

            return Ok(());
        }

        if flags.contains(AccessFlags::FINAL) && flags.contains(AccessFlags::ABSTRACT) {
            return Err(ClassFileError::ClassFinalAndAbstract);
        }

        if flags.contains(AccessFlags::ANNOTATION) {
            return Err(ClassFileError::ClassWithAnnotation);
        }

        Ok(())
    }

    /// `this_class` must be a valid pool index and must refer to a Class
    /// entry.
    pub fn validate_this_class(&self) -> Result<()> {
        if self.this_class == 0 || self.this_class as usize > self.constant_pool.len() {
            return Err(ClassFileError::InvalidThisClassIndex(self.this_class));
        }

        match self.constant_pool[self.this_class] {
            CpInfo::Class(_) => Ok(()),
            _ => Err(ClassFileError::ThisClassNotClassInfo),
        }
    }
}

#[cfg(test)]
mod validate_magic_number_tests {
    use super::*;

    #[test]
    fn it_should_accept_the_magic_number() {
        let cf = ClassFile {
            magic: 0xCAFEBABE,
            ..Default::default()
        };

        assert!(cf.validate_magic_number().is_ok());
    }

    #[test]
    fn it_should_reject_anything_else() {
        let cf = ClassFile {
            magic: 0xDEADBEEF,
            ..Default::default()
        };

        let err = cf.validate_magic_number().unwrap_err();
        assert_eq!(err, ClassFileError::InvalidMagicNumber(0xDEADBEEF));
        assert_eq!(err.to_string(), "invalid magic number: 0xdeadbeef");
    }
}


#[cfg(test)]
mod validate_this_class_tests {
    use super::*;
    use crate::constant_pool::{ClassInfo, ConstantPool, Utf8Info};

    #[test]
    fn it_should_reject_index_zero_and_out_of_range() {
        let cf = ClassFile {
            this_class: 0,
            ..Default::default()
        };

        let err = cf.validate_this_class().unwrap_err();
        assert_eq!(err, ClassFileError::InvalidThisClassIndex(0));
        assert_eq!(err.to_string(), "invalid this class index: 0");
    }

    #[test]
    fn it_should_reject_entries_that_are_not_class_infos() {
        let cf = ClassFile {
            this_class: 1,
            constant_pool: ConstantPool::new(vec![CpInfo::Utf8(Utf8Info {
                bytes: b"Foo".to_vec(),
            })]),
            ..Default::default()
        };

        let err = cf.validate_this_class().unwrap_err();
        assert_eq!(err, ClassFileError::ThisClassNotClassInfo);
        assert_eq!(err.to_string(), "this class should be a CONSTANT_Class_info");
    }

    #[test]
    fn it_should_accept_a_class_info_entry() {
        let cf = ClassFile {
            this_class: 1,
            constant_pool: ConstantPool::new(vec![CpInfo::Class(ClassInfo { name_index: 2 })]),
            ..Default::default()
        };

        assert!(cf.validate_this_class().is_ok());
    }
}
