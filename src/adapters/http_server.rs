//! HTTP transport adapter (ESP-IDF only).
//!
//! One wildcard GET handler forwards every path to the control loop via
//! [`roundtrip`](crate::api::channels::roundtrip) and copies the
//! [`HttpResponse`](crate::api::HttpResponse) it gets back onto the wire.
//! Routing itself happens in [`Router`](crate::api::routes::Router).

#[cfg(target_os = "espidf")]
pub fn start() -> anyhow::Result<esp_idf_svc::http::server::EspHttpServer<'static>> {
    use esp_idf_svc::http::Method;
    use esp_idf_svc::http::server::{Configuration, EspHttpServer};
    use esp_idf_svc::io::Write;
    use log::info;

    use crate::api::channels::roundtrip;

    let conf = Configuration {
        stack_size: 8 * 1024,
        uri_match_wildcard: true,
        ..Default::default()
    };
    let mut server = EspHttpServer::new(&conf)?;

    server.fn_handler::<anyhow::Error, _>("/*", Method::Get, |req| {
        let response = roundtrip(req.uri());
        req.into_response(
            response.status,
            None,
            &[("Content-Type", response.content_type)],
        )?
        .write_all(response.body.as_bytes())?;
        Ok(())
    })?;

    info!("HTTP: server listening on :80");
    Ok(server)
}
