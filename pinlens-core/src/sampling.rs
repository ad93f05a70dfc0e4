//! Randomised page and window selection for paged search results.
//!
//! Stage one of a search learns how many result pages exist; stage two
//! fetches one page and keeps a contiguous window of its photos. The
//! functions here hold the arithmetic for both draws so they can be tested
//! without a transport. All of them are total: no input produces an
//! out-of-range page number or slice.
//!
//! The window draw deliberately biases towards the front of a page (large
//! draws are shifted back by the window cap, small pages collapse to offset
//! zero). Callers that need a uniform window should draw the start offset
//! themselves and use [`window_for_draw`] only for bounds safety.

use std::ops::Range;

use rand::Rng;

/// Deepest result page a search will request.
///
/// Photo services shuffle and re-rank deep result pages; beyond this depth
/// page contents overlap heavily, so the page draw is capped here.
pub const MAX_PAGE_DEPTH: u32 = 40;

/// Largest number of photos kept from a fetched page.
pub const MAX_WINDOW_LEN: usize = 21;

/// Number of pages eligible for the page draw.
///
/// Caps `total_pages` at `depth_cap` and floors the result at one so a
/// zero-page report still yields a valid page number.
///
/// # Examples
/// ```
/// use pinlens_core::sampling::{MAX_PAGE_DEPTH, page_limit};
///
/// assert_eq!(page_limit(5, MAX_PAGE_DEPTH), 5);
/// assert_eq!(page_limit(100, MAX_PAGE_DEPTH), 40);
/// assert_eq!(page_limit(0, MAX_PAGE_DEPTH), 1);
/// ```
pub fn page_limit(total_pages: u32, depth_cap: u32) -> u32 {
    total_pages.min(depth_cap).max(1)
}

/// Draw a 1-based page number uniformly from the eligible pages.
pub fn select_page<R: Rng + ?Sized>(total_pages: u32, depth_cap: u32, rng: &mut R) -> u32 {
    rng.gen_range(1..=page_limit(total_pages, depth_cap))
}

/// Resolve a raw draw into the contiguous window to keep.
///
/// `photo_count` is the number of photos on the fetched page, `window_cap`
/// the most to keep (floored at one), and `draw` a value in
/// `0..photo_count`. The correction rules are:
///
/// 1. a draw greater than `window_cap` is shifted back by `window_cap`;
/// 2. a page no longer than `window_cap` starts at zero;
/// 3. the start is clamped so the window never runs past the end.
///
/// Rules 1 and 2 reproduce the front-biased draw described in the module
/// documentation; rule 3 only takes effect for page lengths strictly between
/// `window_cap` and `2 * window_cap`, where rules 1 and 2 alone could leave
/// the window hanging past the last photo. An empty page yields the empty
/// window.
///
/// # Examples
/// ```
/// use pinlens_core::sampling::{MAX_WINDOW_LEN, window_for_draw};
///
/// assert_eq!(window_for_draw(50, MAX_WINDOW_LEN, 45), 24..45);
/// assert_eq!(window_for_draw(10, MAX_WINDOW_LEN, 7), 0..10);
/// ```
pub fn window_for_draw(photo_count: usize, window_cap: usize, draw: usize) -> Range<usize> {
    let cap = window_cap.max(1);
    let len = photo_count.min(cap);

    let mut start = draw;
    if start > cap {
        start -= cap;
    }
    if photo_count <= cap {
        start = 0;
    }
    let start = start.min(photo_count - len);

    start..start + len
}

/// Draw a window start uniformly and resolve it via [`window_for_draw`].
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use pinlens_core::sampling::{MAX_WINDOW_LEN, select_window};
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let window = select_window(50, MAX_WINDOW_LEN, &mut rng);
/// assert_eq!(window.len(), 21);
/// assert!(window.end <= 50);
/// ```
pub fn select_window<R: Rng + ?Sized>(
    photo_count: usize,
    window_cap: usize,
    rng: &mut R,
) -> Range<usize> {
    if photo_count == 0 {
        return 0..0;
    }
    let draw = rng.gen_range(0..photo_count);
    window_for_draw(photo_count, window_cap, draw)
}
