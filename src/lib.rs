#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;

use std::fmt;

use geom::{Cone, ConeTolerance, Point2, Segment2};
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| {
            std::thread::available_parallelism()
                .map(|value| value.get())
                .ok()
        })
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| JsError::new(&format!("could not initialize rayon thread pool: {err}")))
}

/// JavaScript handle around an immutable [`Cone`].
///
/// Points cross the boundary as flat `[x0, y0, x1, y1, ...]` arrays and masks
/// come back as one byte per element (`1` = contained).
#[wasm_bindgen]
pub struct ConeHandle {
    cone: Cone,
}

#[wasm_bindgen]
impl ConeHandle {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> ConeHandle {
        ConeHandle {
            cone: Cone::default(),
        }
    }

    /// `a`, `b` and `apex` are `[x, y]` pairs.
    #[wasm_bindgen]
    pub fn from_vectors(a: &[f64], b: &[f64], apex: &[f64]) -> Result<ConeHandle, JsValue> {
        Self::from_vectors_with_tolerance(a, b, apex, JsValue::UNDEFINED)
    }

    /// `tolerance` is an optional `{ cross }` object; missing fields keep
    /// their defaults.
    #[wasm_bindgen]
    pub fn from_vectors_with_tolerance(
        a: &[f64],
        b: &[f64],
        apex: &[f64],
        tolerance: JsValue,
    ) -> Result<ConeHandle, JsValue> {
        let a = point_from_slice(a)?.to_vec2();
        let b = point_from_slice(b)?.to_vec2();
        let apex = point_from_slice(apex)?;
        let tol = tolerance_from_js(tolerance)?;
        let cone = Cone::from_vectors_with_tolerance(a, b, apex, tol).map_err(to_js_error)?;
        Ok(ConeHandle { cone })
    }

    /// Each segment is `[ax, ay, bx, by]`.
    #[wasm_bindgen]
    pub fn from_segments(seg0: &[f64], seg1: &[f64]) -> Result<ConeHandle, JsValue> {
        Self::from_segments_with_tolerance(seg0, seg1, JsValue::UNDEFINED)
    }

    #[wasm_bindgen]
    pub fn from_segments_with_tolerance(
        seg0: &[f64],
        seg1: &[f64],
        tolerance: JsValue,
    ) -> Result<ConeHandle, JsValue> {
        let seg0 = segment_from_slice(seg0)?;
        let seg1 = segment_from_slice(seg1)?;
        let tol = tolerance_from_js(tolerance)?;
        let cone = Cone::from_segments_with_tolerance(seg0, seg1, tol).map_err(to_js_error)?;
        Ok(ConeHandle { cone })
    }

    #[wasm_bindgen]
    pub fn is_degenerate(&self) -> bool {
        self.cone.is_degenerate()
    }

    #[wasm_bindgen]
    pub fn contains_points(&self, points: &[f64]) -> Result<Vec<u8>, JsValue> {
        let points = points_from_flat(points)?;
        Ok(to_byte_mask(&self.cone.contains_points(&points)))
    }

    #[wasm_bindgen]
    pub fn contains_segments(&self, starts: &[f64], ends: &[f64]) -> Result<Vec<u8>, JsValue> {
        let starts = points_from_flat(starts)?;
        let ends = points_from_flat(ends)?;
        let mask = self
            .cone
            .contains_segments(&starts, &ends)
            .map_err(to_js_error)?;
        Ok(to_byte_mask(&mask))
    }

    #[wasm_bindgen]
    pub fn boundary_polygon(&self, length: f64) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.cone.boundary_polygon(length))
            .map_err(|err| JsError::new(&err.to_string()).into())
    }
}

impl Default for ConeHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ConeHandle {
    /// The wrapped cone, for native callers.
    #[must_use]
    pub fn cone(&self) -> &Cone {
        &self.cone
    }
}

impl From<Cone> for ConeHandle {
    fn from(cone: Cone) -> Self {
        Self { cone }
    }
}

fn point_from_slice(values: &[f64]) -> Result<Point2, JsValue> {
    match values {
        [x, y] => Ok(Point2::from([*x, *y])),
        _ => Err(js_error(&format!(
            "expected an [x, y] pair, got {} values",
            values.len()
        ))),
    }
}

fn segment_from_slice(values: &[f64]) -> Result<Segment2, JsValue> {
    match values {
        [ax, ay, bx, by] => Ok(Segment2::from([[*ax, *ay], [*bx, *by]])),
        _ => Err(js_error(&format!(
            "expected a segment [ax, ay, bx, by], got {} values",
            values.len()
        ))),
    }
}

fn tolerance_from_js(value: JsValue) -> Result<ConeTolerance, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(ConeTolerance::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|err| JsError::new(&err.to_string()).into())
}

fn points_from_flat(values: &[f64]) -> Result<Vec<Point2>, JsValue> {
    if values.len() % 2 != 0 {
        return Err(js_error("flat point array must have an even length"));
    }
    Ok(values
        .chunks_exact(2)
        .map(|xy| Point2::new(xy[0], xy[1]))
        .collect())
}

fn to_byte_mask(mask: &[bool]) -> Vec<u8> {
    mask.iter().map(|&inside| u8::from(inside)).collect()
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    JsError::new(&error.to_string()).into()
}

fn js_error(message: &str) -> JsValue {
    JsError::new(message).into()
}
