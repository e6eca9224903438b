//! Verifier persistence across the redirect boundary.
//!
//! The authorization redirect abandons the calling context: the verifier
//! generated before navigation must survive until the callback is handled,
//! possibly in a fresh process. The store is a single well-known slot,
//! overwriting any prior value. Starting a second flow before completing the
//! first therefore clobbers the first flow's verifier (last writer wins);
//! its exchange will then be rejected upstream.
use std::{
	fs, io,
	path::PathBuf,
	sync::Mutex,
};

use crate::{
	error::AuthError,
	pkce::{PkceCodeVerifier, PkceCodeVerifierBuf},
};

/// Single-slot storage handing the code verifier from the authorization
/// step to the token exchange.
pub trait VerifierStore {
	/// Persists the verifier, overwriting any prior value.
	///
	/// A failure here must surface *before* the caller navigates away, so
	/// the flow is never started in a state that cannot complete.
	fn put(&self, verifier: &PkceCodeVerifier) -> Result<(), AuthError>;

	/// Takes the stored verifier, leaving the slot empty.
	///
	/// The verifier is read exactly once; a completed or failed exchange
	/// never leaves a stale verifier behind for silent reuse.
	fn take(&self) -> Result<Option<PkceCodeVerifierBuf>, AuthError>;
}

impl<T> VerifierStore for &T
where
	T: VerifierStore,
{
	fn put(&self, verifier: &PkceCodeVerifier) -> Result<(), AuthError> {
		T::put(*self, verifier)
	}

	fn take(&self) -> Result<Option<PkceCodeVerifierBuf>, AuthError> {
		T::take(self)
	}
}

/// In-process verifier slot.
///
/// Suitable when the callback is handled in the same process that issued
/// the redirect, e.g. a native application listening on a loopback port.
#[derive(Debug, Default)]
pub struct MemoryStore(Mutex<Option<PkceCodeVerifierBuf>>);

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

impl VerifierStore for MemoryStore {
	fn put(&self, verifier: &PkceCodeVerifier) -> Result<(), AuthError> {
		let mut slot = self.0.lock().map_err(AuthError::storage)?;
		*slot = Some(verifier.to_owned());
		Ok(())
	}

	fn take(&self) -> Result<Option<PkceCodeVerifierBuf>, AuthError> {
		let mut slot = self.0.lock().map_err(AuthError::storage)?;
		Ok(slot.take())
	}
}

/// Verifier slot backed by a single file.
///
/// The on-disk equivalent of the browser's local-storage `verifier` key:
/// it survives the full navigation boundary between the redirect and the
/// callback, even across processes.
#[derive(Debug, Clone)]
pub struct FileStore {
	path: PathBuf,
}

impl FileStore {
	/// Creates a store writing to the given file path.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// Returns the path of the backing file.
	pub fn path(&self) -> &std::path::Path {
		&self.path
	}
}

impl VerifierStore for FileStore {
	fn put(&self, verifier: &PkceCodeVerifier) -> Result<(), AuthError> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent).map_err(AuthError::storage)?;
		}

		log::debug!("persisting code verifier to {}", self.path.display());
		fs::write(&self.path, verifier.as_str()).map_err(AuthError::storage)
	}

	fn take(&self) -> Result<Option<PkceCodeVerifierBuf>, AuthError> {
		let contents = match fs::read_to_string(&self.path) {
			Ok(contents) => contents,
			Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
			Err(e) => return Err(AuthError::storage(e)),
		};

		fs::remove_file(&self.path).map_err(AuthError::storage)?;

		let verifier = PkceCodeVerifierBuf::new(contents)
			.map_err(|_| AuthError::storage("stored verifier is not well-formed"))?;

		Ok(Some(verifier))
	}
}
