use super::state::ArbiterState;

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, state: &ArbiterState) {
        self.step += 1;
        let step = self.step;

        if let Some(writer) = &state.active_writer {
            debug_assert!(
                state.active_readers.is_empty(),
                "step {step}: writer {writer} active alongside readers {:?}",
                state.active_readers
            );
        }

        for (i, reader) in state.active_readers.iter().enumerate() {
            debug_assert!(
                !state.active_readers[i + 1..].contains(reader),
                "step {step}: reader {reader} admitted twice"
            );
            debug_assert!(
                !state.waiting_readers.contains(reader),
                "step {step}: active reader {reader} also waiting"
            );
        }
    }
}
