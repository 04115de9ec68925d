use anyhow::{Context as _, anyhow};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// `JsValue` is not an `Error`, so DOM failures are turned into `anyhow` errors by hand.
pub(crate) trait JsResultExt<T> {
    fn js_context(self, what: &'static str) -> anyhow::Result<T>;
}

impl<T> JsResultExt<T> for Result<T, JsValue> {
    fn js_context(self, what: &'static str) -> anyhow::Result<T> {
        self.map_err(|err| anyhow!("{}: {:?}", what, err))
    }
}

pub(crate) fn context_2d(canvas: &HtmlCanvasElement) -> anyhow::Result<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .js_context("get_context")?
        .context("canvas has no 2d context")?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|obj| anyhow!("not a 2d context: {:?}", obj))
}
