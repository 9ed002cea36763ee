//! Whole-frame reads off a byte queue.
//!
//! A pull-model engine callback and the driver's writer share one
//! byte queue. The writer pushes byte by byte, so at any moment the
//! tail may hold a partial frame. Reading whole frames only keeps the
//! head of the queue on a frame boundary, so channels never shift.

//----------------------------------------------------------------------------------------------- use
use crossbeam::queue::ArrayQueue;

//----------------------------------------------------------------------------------------------- Pull
/// Fill `output` with interleaved frames of `channels` samples.
///
/// A frame is only taken once all `N * channels` of its bytes are
/// queued, anything short of that plays as `silence` and stays queued.
///
/// Returns the number of frames taken off `queue`.
pub(crate) fn pull<T: Copy, const N: usize>(
	queue: &ArrayQueue<u8>,
	output: &mut [T],
	channels: usize,
	silence: T,
	decode: fn([u8; N]) -> T,
) -> usize {
	let frame_bytes = N * channels;
	let mut frames = 0;

	for frame in output.chunks_exact_mut(channels) {
		if queue.len() < frame_bytes {
			frame.fill(silence);
			continue;
		}

		for sample in frame.iter_mut() {
			*sample = pop::<N>(queue).map_or(silence, decode);
		}
		frames += 1;
	}

	frames
}

/// Pop one little-endian sample.
fn pop<const N: usize>(queue: &ArrayQueue<u8>) -> Option<[u8; N]> {
	let mut bytes = [0; N];
	for b in &mut bytes {
		*b = queue.pop()?;
	}
	Some(bytes)
}

//----------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn push(queue: &ArrayQueue<u8>, bytes: &[u8]) {
		for b in bytes {
			queue.push(*b).unwrap();
		}
	}

	#[test]
	fn half_pushed_frame_stays_queued() {
		let queue = ArrayQueue::new(64);
		let left  = 0.25_f32.to_le_bytes();
		let right = (-0.5_f32).to_le_bytes();

		// Only the left sample made it in before the callback ran.
		push(&queue, &left);
		let mut output = [1.0_f32; 4];
		assert_eq!(pull::<f32, 4>(&queue, &mut output, 2, 0.0, f32::from_le_bytes), 0);
		assert_eq!(output, [0.0; 4]);
		assert_eq!(queue.len(), 4);

		// The rest of the frame, then one more.
		push(&queue, &right);
		push(&queue, &left);
		push(&queue, &right);
		assert_eq!(pull::<f32, 4>(&queue, &mut output, 2, 0.0, f32::from_le_bytes), 2);
		assert_eq!(output, [0.25, -0.5, 0.25, -0.5]);
		assert!(queue.is_empty());
	}

	#[test]
	fn underrun_mid_callback() {
		let queue = ArrayQueue::new(64);
		// One full 16-bit frame and a lone left sample.
		push(&queue, &[1, 0, 2, 0, 3, 0]);

		let mut output = [-1_i16; 6];
		assert_eq!(pull::<i16, 2>(&queue, &mut output, 2, 0, i16::from_le_bytes), 1);
		assert_eq!(output, [1, 2, 0, 0, 0, 0]);

		push(&queue, &[4, 0]);
		assert_eq!(pull::<i16, 2>(&queue, &mut output, 2, 0, i16::from_le_bytes), 1);
		assert_eq!(output, [3, 4, 0, 0, 0, 0]);
	}
}
