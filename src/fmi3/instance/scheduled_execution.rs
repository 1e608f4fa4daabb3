use super::Fmi3Instance;
use crate::{
    buffer::GFloat,
    fmi3::{binding, Fmi3},
    Error, Status,
};

impl Fmi3Instance<'_> {
    /// Run the model partition of `clock_reference`, which ticked at `activation_time`.
    pub fn activate_model_partition(
        &mut self,
        clock_reference: binding::fmi3ValueReference,
        activation_time: f64,
    ) -> Result<Status, Error> {
        let raw = self.scheduled_execution(|se, c| unsafe {
            (se.fmi3ActivateModelPartition)(c, clock_reference, activation_time)
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "ActivateModelPartition",
            format_args!(
                "clockReference={clock_reference}, activationTime={}",
                GFloat::f64(activation_time)
            ),
        ))
    }
}
