use super::{composer::Composer, message::MessageReceiver};

/// Adapts a [`Composer`] to device callbacks of any size.
///
/// The composer steps its envelopes once per block, so the block size sets
/// how fast the drone drifts. Devices hand out buffers of whatever size they
/// like; this renders fixed-size blocks into a carry buffer and copies them
/// out frame by frame, keeping the drift rate independent of the device.
pub struct BlockStream<M> {
    composer: Composer<M>,
    block: Vec<f32>,
    position: usize,
}

impl<M: MessageReceiver> BlockStream<M> {
    /// `block_size` of 0 is treated as 1.
    pub fn new(composer: Composer<M>, block_size: usize) -> Self {
        let block_size = block_size.max(1);
        Self {
            composer,
            block: vec![0.0; block_size],
            // Empty, so the first frame renders a block.
            position: block_size,
        }
    }

    /// Fill an interleaved buffer, writing the mono mix to every channel.
    ///
    /// `on_block` sees each freshly rendered block, e.g. to feed a scope.
    pub fn fill_interleaved<F>(
        &mut self,
        data: &mut [f32],
        channels: usize,
        input_level: Option<f32>,
        mut on_block: F,
    ) where
        F: FnMut(&[f32]),
    {
        let channels = channels.max(1);
        for frame in data.chunks_mut(channels) {
            if self.position == self.block.len() {
                self.composer.produce_block(&mut self.block, input_level);
                self.position = 0;
                on_block(&self.block);
            }
            frame.fill(self.block[self.position]);
            self.position += 1;
        }
    }

    pub fn block_size(&self) -> usize {
        self.block.len()
    }

    pub fn composer(&self) -> &Composer<M> {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut Composer<M> {
        &mut self.composer
    }
}
