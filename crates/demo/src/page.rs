//! The demo pages: a form on GET, an echo of the submitted body on POST.

use async_trait::async_trait;
use http_body_util::BodyExt;
use simple_http::connection::ResponseWriter;
use simple_http::handler::{Handler, HandlerError};
use simple_http::protocol::RequestHeader;
use simple_http::protocol::body::RequestBody;
use tracing::info;

const PAGE_TITLE: &str = "<html><body><h1>Simple Server</h1>";

#[derive(Debug, Clone, Copy, Default)]
pub struct DemoHandler;

#[async_trait]
impl Handler for DemoHandler {
    async fn handle_get(&self, request: &RequestHeader, response: &mut ResponseWriter) -> Result<(), HandlerError> {
        info!(target = request.target(), "request");

        response.write_success();
        response.write_line(PAGE_TITLE);
        response.write_line(&format!("Current Time: {}", http_date()));
        response.write_line(&format!("url : {}", request.target()));

        response.write_line("<form method=post action=/form>");
        response.write_line("<input type=text name=FirstName value=FirstName>");
        response.write_line("<input type=submit name=ClickValue value=Click>");
        response.write_line("</form>");
        Ok(())
    }

    async fn handle_post(&self, request: &RequestHeader, body: RequestBody, response: &mut ResponseWriter) -> Result<(), HandlerError> {
        info!(target = request.target(), "POST request");
        let data = body.collect().await?.to_bytes();

        response.write_success();
        response.write_line(PAGE_TITLE);
        response.write_line("<a href=/test>return</a><p>");
        response.write_line(&format!("postbody: <pre>{}</pre>", String::from_utf8_lossy(&data)));
        Ok(())
    }
}

fn http_date() -> String {
    let mut buf = faf_http_date::get_date_buff_no_key();
    faf_http_date::get_date_no_key(&mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}
