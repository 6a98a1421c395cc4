use core::convert::Infallible;
use rand::TryRng;

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic rng for tests: emits `word` first and walks a Weyl
/// sequence from there. The first draw decides the dud coin, so a low
/// starting word survives and a high one detonates.
#[derive(Clone, Debug)]
pub(crate) struct StepRng {
    word: u64,
}

impl StepRng {
    pub(crate) fn new(word: u64) -> Self {
        Self { word }
    }
}

impl TryRng for StepRng {
    type Error = Infallible;

    fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
        Ok((self.try_next_u64()? >> 32) as u32)
    }

    fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
        let word = self.word;
        self.word = self.word.wrapping_add(GOLDEN_GAMMA);
        Ok(word)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Self::Error> {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.try_next_u64()?.to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
        Ok(())
    }
}
