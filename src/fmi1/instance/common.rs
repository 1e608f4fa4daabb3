use super::{boolean, check_len, Fmi1Instance};
use crate::{
    buffer::{c_strings, try_collect, Booleans, Strings, Values},
    dispatch::VersionDescriptor,
    fmi1::{binding, Fmi1},
    logger::fmu_str,
    Error, Status,
};

fn booleans(values: &[binding::fmiBoolean]) -> Values<'_> {
    Values::Boolean(Booleans::Fmi1(values))
}

macro_rules! impl_getter_setter {
    ($ty:ty, $values:expr, $get:ident, $set:ident, $fmi_get:ident, $fmi_set:ident) => {
        pub fn $get(
            &mut self,
            vr: &[binding::fmiValueReference],
            values: &mut [$ty],
        ) -> Result<Status, Error> {
            check_len(vr.len(), values.len())?;
            let raw = self.instance.invoke::<Fmi1, _>(|f, c| unsafe {
                (f.common.$fmi_get)(c, vr.as_ptr(), vr.len(), values.as_mut_ptr())
            })?;
            Ok(self.instance.finish::<Fmi1>(
                raw,
                &stringify!($fmi_get)[3..],
                format_args!(
                    "vr={{{}}}, nvr={}, value={{{}}}",
                    Values::ValueReference(vr),
                    vr.len(),
                    ($values)(&*values)
                ),
            ))
        }

        pub fn $set(
            &mut self,
            vr: &[binding::fmiValueReference],
            values: &[$ty],
        ) -> Result<Status, Error> {
            check_len(vr.len(), values.len())?;
            let raw = self.instance.invoke::<Fmi1, _>(|f, c| unsafe {
                (f.common.$fmi_set)(c, vr.as_ptr(), vr.len(), values.as_ptr())
            })?;
            Ok(self.instance.finish::<Fmi1>(
                raw,
                &stringify!($fmi_set)[3..],
                format_args!(
                    "vr={{{}}}, nvr={}, value={{{}}}",
                    Values::ValueReference(vr),
                    vr.len(),
                    ($values)(values)
                ),
            ))
        }
    };
}

impl Fmi1Instance<'_> {
    pub fn get_version(&mut self) -> Result<String, Error> {
        let version = self.instance.invoke::<Fmi1, _>(|f, _| {
            unsafe { fmu_str((f.common.fmiGetVersion)()) }.into_owned()
        })?;
        self.instance
            .log_call(Fmi1::PREFIX, "GetVersion", Status::OK, format_args!(""));
        Ok(version)
    }

    pub fn set_debug_logging(&mut self, logging_on: bool) -> Result<Status, Error> {
        let raw = self.instance.invoke::<Fmi1, _>(|f, c| unsafe {
            (f.common.fmiSetDebugLogging)(c, boolean(logging_on))
        })?;
        Ok(self.instance.finish::<Fmi1>(
            raw,
            "SetDebugLogging",
            format_args!("loggingOn={}", boolean(logging_on)),
        ))
    }

    impl_getter_setter!(
        binding::fmiReal,
        Values::Float64,
        get_real,
        set_real,
        fmiGetReal,
        fmiSetReal
    );
    impl_getter_setter!(
        binding::fmiInteger,
        Values::Int32,
        get_integer,
        set_integer,
        fmiGetInteger,
        fmiSetInteger
    );
    impl_getter_setter!(
        binding::fmiBoolean,
        booleans,
        get_boolean,
        set_boolean,
        fmiGetBoolean,
        fmiSetBoolean
    );

    /// Read string variables. The strings are copied out of the FMU before returning.
    pub fn get_string(
        &mut self,
        vr: &[binding::fmiValueReference],
        values: &mut [String],
    ) -> Result<Status, Error> {
        check_len(vr.len(), values.len())?;
        let mut ptrs: Vec<binding::fmiString> = Vec::new();
        ptrs.try_reserve_exact(vr.len())?;
        ptrs.resize(vr.len(), std::ptr::null());

        let raw = self.instance.invoke::<Fmi1, _>(|f, c| unsafe {
            (f.common.fmiGetString)(c, vr.as_ptr(), vr.len(), ptrs.as_mut_ptr())
        })?;
        let status = self.instance.finish::<Fmi1>(
            raw,
            "GetString",
            format_args!(
                "vr={{{}}}, nvr={}, value={{{}}}",
                Values::ValueReference(vr),
                vr.len(),
                Values::String(unsafe { Strings::new(&ptrs) })
            ),
        );

        if !status.is_error() {
            for (value, ptr) in values.iter_mut().zip(&ptrs) {
                *value = unsafe { fmu_str(*ptr) }.into_owned();
            }
        }
        Ok(status)
    }

    pub fn set_string(
        &mut self,
        vr: &[binding::fmiValueReference],
        values: &[&str],
    ) -> Result<Status, Error> {
        check_len(vr.len(), values.len())?;
        let values = c_strings(values)?;
        let ptrs = try_collect(values.iter().map(|v| v.as_ptr()))?;

        let raw = self.instance.invoke::<Fmi1, _>(|f, c| unsafe {
            (f.common.fmiSetString)(c, vr.as_ptr(), vr.len(), ptrs.as_ptr())
        })?;
        Ok(self.instance.finish::<Fmi1>(
            raw,
            "SetString",
            format_args!(
                "vr={{{}}}, nvr={}, value={{{}}}",
                Values::ValueReference(vr),
                vr.len(),
                Values::String(unsafe { Strings::new(&ptrs) })
            ),
        ))
    }
}
