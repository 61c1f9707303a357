use crate::{
    attributes::Attributes,
    class_file::{FieldInfo, MethodInfo},
    constant_pool::{
        ClassInfo, CpInfo, NameAndTypeInfo, Numeric32Info, RefInfo, StringInfo, Utf8Info,
        CONSTANT_CLASS, CONSTANT_FIELD_REF, CONSTANT_FLOAT, CONSTANT_INTEGER,
        CONSTANT_INTERFACE_METHOD_REF, CONSTANT_METHOD_REF, CONSTANT_NAME_AND_TYPE,
        CONSTANT_STRING, CONSTANT_UTF8,
    },
    reader::ByteReader,
    Attribute, ClassFile, ClassFileError, ConstantPool, Result,
};

/// Decodes the class file wire format. The format is positional: every item
/// is read in file order, with no look-ahead and no seeking.
pub struct Parser<'a> {
    r: ByteReader<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            r: ByteReader::new(buf),
        }
    }

    pub fn parse(&mut self) -> Result<ClassFile> {
        let magic = self.r.read_u32()?;
        let minor_version = self.r.read_u16()?;
        let major_version = self.r.read_u16()?;

        let constant_pool = self.parse_constant_pool()?;
        let access_flags = self.r.read_u16()?;
        let this_class = self.r.read_u16()?;
        let super_class = self.r.read_u16()?;

        let interfaces_count = self.r.read_u16()?;
        let interfaces = self.r.read_u16_table(interfaces_count)?;

        let fields_count = self.r.read_u16()?;
        let fields = (0..fields_count)
            .map(|_| self.parse_field_info())
            .collect::<Result<Vec<_>>>()?;

        let methods_count = self.r.read_u16()?;
        let methods = (0..methods_count)
            .map(|_| self.parse_method_info())
            .collect::<Result<Vec<_>>>()?;

        let attributes_count = self.r.read_u16()?;
        let attributes = self.parse_attributes(attributes_count)?;

        let class_file = ClassFile {
            magic,
            minor_version,
            major_version,
            constant_pool,
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            attributes,
        };

        class_file.validate()?;

        Ok(class_file)
    }

    fn parse_constant_pool(&mut self) -> Result<ConstantPool> {
        // constant_pool_count is the number of entries plus one.
        let constant_pool_count = self.r.read_u16()?;
        if constant_pool_count < 2 {
            return Err(ClassFileError::InvalidConstantPoolSize);
        }

        let count = constant_pool_count as usize - 1;
        let mut cp_infos = Vec::with_capacity(count);
        for _ in 0..count {
            cp_infos.push(self.parse_cp_info()?);
        }

        Ok(ConstantPool::new(cp_infos))
    }

    fn parse_cp_info(&mut self) -> Result<CpInfo> {
        let tag = self.r.read_u8()?;
        match tag {
            CONSTANT_UTF8 => self.parse_utf8(),
            CONSTANT_INTEGER => self.parse_integer(),
            CONSTANT_FLOAT => self.parse_float(),
            CONSTANT_CLASS => self.parse_class_info(),
            CONSTANT_STRING => self.parse_string(),
            CONSTANT_FIELD_REF => Ok(CpInfo::FieldRef(self.parse_ref_info()?)),
            CONSTANT_METHOD_REF => Ok(CpInfo::MethodRef(self.parse_ref_info()?)),
            CONSTANT_INTERFACE_METHOD_REF => {
                Ok(CpInfo::InterfaceMethodRef(self.parse_ref_info()?))
            }
            CONSTANT_NAME_AND_TYPE => self.parse_name_and_type_info(),
            _ => Err(ClassFileError::InvalidConstantPoolTag(tag)),
        }
    }

    fn parse_utf8(&mut self) -> Result<CpInfo> {
        let length = self.r.read_u16()?;
        let bytes = self.r.read_bytes(length as usize)?;

        Ok(CpInfo::Utf8(Utf8Info { bytes }))
    }

    fn parse_integer(&mut self) -> Result<CpInfo> {
        let bytes = self.r.read_u32()?;

        Ok(CpInfo::Integer(Numeric32Info { bytes }))
    }

    fn parse_float(&mut self) -> Result<CpInfo> {
        let bytes = self.r.read_u32()?;

        Ok(CpInfo::Float(Numeric32Info { bytes }))
    }

    fn parse_class_info(&mut self) -> Result<CpInfo> {
        let name_index = self.r.read_u16()?;

        Ok(CpInfo::Class(ClassInfo { name_index }))
    }

    fn parse_string(&mut self) -> Result<CpInfo> {
        let string_index = self.r.read_u16()?;

        Ok(CpInfo::String(StringInfo { string_index }))
    }

    fn parse_name_and_type_info(&mut self) -> Result<CpInfo> {
        let name_index = self.r.read_u16()?;
        let descriptor_index = self.r.read_u16()?;

        Ok(CpInfo::NameAndType(NameAndTypeInfo {
            name_index,
            descriptor_index,
        }))
    }

    fn parse_ref_info(&mut self) -> Result<RefInfo> {
        let class_index = self.r.read_u16()?;
        let name_and_type_index = self.r.read_u16()?;

        Ok(RefInfo {
            class_index,
            name_and_type_index,
        })
    }

    fn parse_field_info(&mut self) -> Result<FieldInfo> {
        let access_flags = self.r.read_u16()?;
        let name_index = self.r.read_u16()?;
        let descriptor_index = self.r.read_u16()?;
        let attributes_count = self.r.read_u16()?;
        let attributes = self.parse_attributes(attributes_count)?;

        Ok(FieldInfo {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
        })
    }

    fn parse_method_info(&mut self) -> Result<MethodInfo> {
        let access_flags = self.r.read_u16()?;
        let name_index = self.r.read_u16()?;
        let descriptor_index = self.r.read_u16()?;
        let attributes_count = self.r.read_u16()?;
        let attributes = self.parse_attributes(attributes_count)?;

        Ok(MethodInfo {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
        })
    }

    fn parse_attribute(&mut self) -> Result<Attribute> {
        let attribute_name_index = self.r.read_u16()?;
        let attribute_length = self.r.read_u32()?;
        let info = self.r.read_bytes(attribute_length as usize)?;

        Ok(Attribute {
            attribute_name_index,
            info,
        })
    }

    fn parse_attributes(&mut self, attributes_count: u16) -> Result<Attributes> {
        (0..attributes_count)
            .map(|_| self.parse_attribute())
            .collect::<Result<Vec<_>>>()
            .map(Attributes)
    }
}



#[cfg(test)]
mod parse_attribute_tests {
    use super::*;

    #[test]
    fn it_should_keep_the_payload_opaque() {
        let attribute = Parser::new(&[0x00, 0x0d, 0x00, 0x00, 0x00, 0x02, 0xca, 0xfe])
            .parse_attribute()
            .unwrap();

        assert_eq!(attribute.attribute_name_index, 13);
        assert_eq!(attribute.info, vec![0xca, 0xfe]);
    }

    #[test]
    fn it_should_fail_if_the_header_is_truncated() {
        assert_eq!(
            Parser::new(&[0x00, 0x0d, 0x00, 0x00]).parse_attribute().unwrap_err(),
            ClassFileError::UnexpectedEndOfInput
        );
    }

    #[test]
    fn it_should_fail_if_the_payload_is_truncated() {
        assert_eq!(
            Parser::new(&[0x00, 0x0d, 0x00, 0x00, 0x00, 0x04, 0xca, 0xfe])
                .parse_attribute()
                .unwrap_err(),
            ClassFileError::UnexpectedEndOfInput
        );
    }
}
