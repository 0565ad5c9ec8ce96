const MOBILE_MARKERS: [&str; 6] = ["android", "iphone", "ipad", "ipod", "mobile", "tablet"];

/// Rough phone/tablet check on the `User-Agent` header.
pub fn is_probably_mobile(user_agent: Option<&str>) -> bool {
    let Some(ua) = user_agent else {
        return false;
    };
    let ua = ua.to_ascii_lowercase();
    MOBILE_MARKERS.iter().any(|marker| ua.contains(marker))
}
