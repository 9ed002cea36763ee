//! Device resolution.
//!
//! Turns an optional endpoint id into a usable [`Device`], falling back
//! to the platform default when the id is missing or matches nothing.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	engine::{Enumerator,Device},
	error::DriverError,
	macros::{debug2,info2,warn2,native_err,native_warn},
};

//---------------------------------------------------------------------------------------------------- Resolve
/// Find the endpoint with exactly the id `id`, else the default endpoint.
///
/// - candidates that fail to be retrieved, or whose id can't be read, are skipped
/// - the id comparison is case-sensitive
/// - if several candidates share the id, the first one wins
///
/// # Errors
/// [`DriverError::DeviceUnavailable`] if there is neither a match nor a default endpoint.
///
/// ```rust
/// # use wasapi_out::{backend::dummy::*, device::resolve, engine::Device};
/// let enumerator = DummyEnumerator::new()
/// 	.with_endpoint(DummyEndpoint::new("hdmi", "HDMI"))
/// 	.with_default(DummyEndpoint::new("speakers", "Speakers"));
///
/// assert_eq!(resolve(&enumerator, Some("hdmi")).unwrap().id().unwrap(), "hdmi");
/// assert_eq!(resolve(&enumerator, Some("HDMI")).unwrap().id().unwrap(), "speakers");
/// assert_eq!(resolve(&enumerator, None).unwrap().id().unwrap(), "speakers");
/// ```
pub fn resolve<E: Enumerator>(enumerator: &E, id: Option<&str>) -> Result<E::Device, DriverError> {
	if let Some(id) = id {
		info2!("Initializing device {id} ...");
		if let Some(device) = find(enumerator, id) {
			info2!("Device initialized");
			return Ok(device);
		}
		warn2!("Failed to initialize device {id}, falling back to default");
	}

	info2!("Initializing default device ...");
	match enumerator.default_endpoint() {
		Ok(device) => {
			info2!("Device initialized");
			Ok(device)
		},
		Err(e) => {
			drop(native_err!("GetDefaultAudioEndpoint", e));
			Err(DriverError::DeviceUnavailable)
		},
	}
}

/// Scan the active endpoints for `id`.
fn find<E: Enumerator>(enumerator: &E, id: &str) -> Option<E::Device> {
	let candidates = match enumerator.active_endpoints() {
		Ok(c) => c,
		Err(e) => {
			drop(native_warn!("EnumAudioEndpoints", e));
			return None;
		},
	};

	for (i, candidate) in candidates.into_iter().enumerate() {
		let device = match candidate {
			Ok(d) => d,
			Err(e) => {
				drop(native_warn!("Item", e));
				debug2!("Skipping device #{i}");
				continue;
			},
		};

		match device.id() {
			Ok(candidate_id) if candidate_id == id => {
				debug2!("Found device #{i}: {id}");
				return Some(device);
			},
			Ok(_) => (),
			Err(e) => drop(native_warn!("GetId", e)),
		}
	}

	None
}

//---------------------------------------------------------------------------------------------------- List
/// The ids of all active output endpoints.
///
/// Each endpoint is also logged as `name id`, which is where
/// a user finds the id to configure. Candidates that can't be
/// read are left out.
///
/// # Errors
/// Enumeration itself failed.
pub fn device_list<E: Enumerator>(enumerator: &E) -> Result<Vec<String>, DriverError> {
	info2!("Enumerating active devices ...");

	let candidates = enumerator
		.active_endpoints()
		.map_err(|e| native_err!("EnumAudioEndpoints", e))?;

	let mut list = Vec::with_capacity(candidates.len());

	for candidate in candidates {
		let device = match candidate {
			Ok(d) => d,
			Err(e) => {
				drop(native_warn!("Item", e));
				continue;
			},
		};

		let id = match device.id() {
			Ok(id) => id,
			Err(e) => {
				drop(native_warn!("GetId", e));
				continue;
			},
		};

		let name = device.friendly_name().unwrap_or_default();
		info2!("{name} {id}");
		list.push(id);
	}

	info2!("Devices enumerated");
	Ok(list)
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use crate::backend::dummy::{DummyEndpoint,DummyEnumerator};
	use pretty_assertions::assert_eq;

	fn id(device: &DummyEndpoint) -> String {
		device.id().unwrap()
	}

	#[test]
	fn exact_match() {
		let enumerator = DummyEnumerator::new()
			.with_default(DummyEndpoint::new("a", "A"))
			.with_endpoint(DummyEndpoint::new("b", "B"));
		assert_eq!(id(&resolve(&enumerator, Some("b")).unwrap()), "b");
	}

	#[test]
	fn first_duplicate_wins() {
		let first = DummyEndpoint::new("dup", "First");
		let enumerator = DummyEnumerator::new()
			.with_endpoint(first)
			.with_endpoint(DummyEndpoint::new("dup", "Second"));
		let device = resolve(&enumerator, Some("dup")).unwrap();
		assert_eq!(device.friendly_name().unwrap(), "First");
	}

	#[test]
	fn skips_broken_candidates() {
		let enumerator = DummyEnumerator::new()
			.with_broken_endpoint()
			.with_endpoint(DummyEndpoint::new("x", "X").broken_id())
			.with_endpoint(DummyEndpoint::new("y", "Y"));
		assert_eq!(id(&resolve(&enumerator, Some("y")).unwrap()), "y");
	}

	#[test]
	fn falls_back_to_default() {
		let enumerator = DummyEnumerator::new()
			.with_endpoint(DummyEndpoint::new("a", "A"))
			.with_default(DummyEndpoint::new("default", "Default"));

		assert_eq!(id(&resolve(&enumerator, Some("missing")).unwrap()), "default");
		assert_eq!(id(&resolve(&enumerator, Some("")).unwrap()), "default");
		assert_eq!(id(&resolve(&enumerator, None).unwrap()), "default");
	}

	#[test]
	fn no_default() {
		let enumerator = DummyEnumerator::new().with_endpoint(DummyEndpoint::new("a", "A"));
		assert!(matches!(resolve(&enumerator, Some("b")), Err(DriverError::DeviceUnavailable)));
		assert!(matches!(resolve(&enumerator, None), Err(DriverError::DeviceUnavailable)));
	}

	#[test]
	fn enumeration_fails() {
		let enumerator = DummyEnumerator::new()
			.with_default(DummyEndpoint::new("a", "A"))
			.failing();
		assert!(matches!(resolve(&enumerator, Some("a")), Err(DriverError::DeviceUnavailable)));
		assert!(device_list(&enumerator).is_err());
	}

	#[test]
	fn list() {
		let enumerator = DummyEnumerator::new()
			.with_endpoint(DummyEndpoint::new("a", "A"))
			.with_broken_endpoint()
			.with_endpoint(DummyEndpoint::new("b", "B").broken_id())
			.with_default(DummyEndpoint::new("c", "C"));
		assert_eq!(device_list(&enumerator).unwrap(), ["a", "c"]);
	}

	#[cfg(feature = "log")]
	#[test]
	fn info_lines() {
		use log::Level;

		static LINES: parking_lot::Mutex<Vec<(Level, String)>> = parking_lot::const_mutex(Vec::new());

		struct Capture;
		impl log::Log for Capture {
			fn enabled(&self, _: &log::Metadata<'_>) -> bool { true }
			fn log(&self, record: &log::Record<'_>) {
				LINES.lock().push((record.level(), record.args().to_string()));
			}
			fn flush(&self) {}
		}
		static CAPTURE: Capture = Capture;

		// Only fails if already set by an earlier run of this test.
		let _ = log::set_logger(&CAPTURE);
		log::set_max_level(log::LevelFilter::Trace);

		let enumerator = DummyEnumerator::new()
			.with_endpoint(DummyEndpoint::new("info-a", "Info A"))
			.with_default(DummyEndpoint::new("info-b", "Info B"));
		resolve(&enumerator, Some("info-a")).unwrap();
		device_list(&enumerator).unwrap();

		let lines = LINES.lock();
		for line in [
			"Initializing device info-a ...",
			"Device initialized",
			"Enumerating active devices ...",
			"Info A info-a",
			"Info B info-b",
			"Devices enumerated",
		] {
			assert!(lines.contains(&(Level::Info, line.to_string())), "missing: {line}");
		}
	}

	#[test]
	fn empty_list() {
		assert!(device_list(&DummyEnumerator::new()).unwrap().is_empty());
	}
}
