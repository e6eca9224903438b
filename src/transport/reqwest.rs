use crate::{error::AuthError, transport::HttpClient};

impl HttpClient for reqwest::Client {
	async fn send(
		&self,
		request: http::Request<Vec<u8>>,
	) -> Result<http::Response<Vec<u8>>, AuthError> {
		log::debug!("HTTP request to: {}", request.uri());
		log::trace!("HTTP request: {request:?}");

		let response = self
			.execute(request.try_into().map_err(AuthError::network)?)
			.await
			.map_err(AuthError::network)?;

		let mut builder = http::Response::builder().status(response.status());

		#[cfg(not(target_arch = "wasm32"))]
		{
			builder = builder.version(response.version());
		}

		for (name, value) in response.headers().iter() {
			builder = builder.header(name, value);
		}

		let response = builder
			.body(
				response
					.bytes()
					.await
					.map_err(AuthError::network)?
					.to_vec(),
			)
			.map_err(AuthError::network)?;

		log::trace!("HTTP response: {response:?}");

		Ok(response)
	}
}
