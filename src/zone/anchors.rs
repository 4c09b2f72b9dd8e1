//! Embedded table of timezone anchor points used by the nearest-anchor resolver.
//!
//! Each entry is a representative location (usually the zone's principal city)
//! for one IANA zone. The table trades precision near zone borders for a fully
//! offline lookup; resolution picks the anchor closest by great-circle
//! distance.

/// `(latitude, longitude, IANA zone name)`.
pub(crate) const ZONE_ANCHORS: &[(f64, f64, &str)] = &[
    // Americas
    (61.22, -149.90, "America/Anchorage"),
    (21.31, -157.86, "Pacific/Honolulu"),
    (49.28, -123.12, "America/Vancouver"),
    (34.05, -118.24, "America/Los_Angeles"),
    (33.45, -112.07, "America/Phoenix"),
    (39.74, -104.99, "America/Denver"),
    (51.05, -114.07, "America/Edmonton"),
    (19.43, -99.13, "America/Mexico_City"),
    (29.76, -95.37, "America/Chicago"),
    (44.98, -93.27, "America/Chicago"),
    (49.90, -97.14, "America/Winnipeg"),
    (25.76, -80.19, "America/New_York"),
    (40.71, -74.01, "America/New_York"),
    (43.65, -79.38, "America/Toronto"),
    (45.50, -73.57, "America/Montreal"),
    (44.65, -63.57, "America/Halifax"),
    (47.56, -52.71, "America/St_Johns"),
    (23.11, -82.37, "America/Havana"),
    (18.47, -69.90, "America/Santo_Domingo"),
    (17.98, -76.80, "America/Jamaica"),
    (14.63, -90.52, "America/Guatemala"),
    (9.93, -84.08, "America/Costa_Rica"),
    (8.98, -79.52, "America/Panama"),
    (4.71, -74.07, "America/Bogota"),
    (10.49, -66.88, "America/Caracas"),
    (-0.18, -78.47, "America/Guayaquil"),
    (-12.05, -77.04, "America/Lima"),
    (-16.50, -68.15, "America/La_Paz"),
    (-25.28, -57.63, "America/Asuncion"),
    (-33.45, -70.67, "America/Santiago"),
    (-34.60, -58.38, "America/Argentina/Buenos_Aires"),
    (-34.90, -56.16, "America/Montevideo"),
    (-3.73, -38.53, "America/Fortaleza"),
    (-8.05, -34.90, "America/Recife"),
    (-15.78, -47.93, "America/Sao_Paulo"),
    (-23.55, -46.63, "America/Sao_Paulo"),
    (-3.10, -60.02, "America/Manaus"),
    (-1.46, -48.50, "America/Belem"),
    (64.13, -21.90, "Atlantic/Reykjavik"),
    (64.18, -51.72, "America/Nuuk"),
    // Europe
    (53.35, -6.26, "Europe/Dublin"),
    (51.51, -0.13, "Europe/London"),
    (38.72, -9.14, "Europe/Lisbon"),
    (40.42, -3.70, "Europe/Madrid"),
    (48.86, 2.35, "Europe/Paris"),
    (50.85, 4.35, "Europe/Brussels"),
    (52.37, 4.90, "Europe/Amsterdam"),
    (52.52, 13.40, "Europe/Berlin"),
    (47.37, 8.54, "Europe/Zurich"),
    (48.21, 16.37, "Europe/Vienna"),
    (41.90, 12.50, "Europe/Rome"),
    (50.08, 14.44, "Europe/Prague"),
    (52.23, 21.01, "Europe/Warsaw"),
    (47.50, 19.04, "Europe/Budapest"),
    (44.43, 26.10, "Europe/Bucharest"),
    (42.70, 23.32, "Europe/Sofia"),
    (37.98, 23.73, "Europe/Athens"),
    (41.01, 28.98, "Europe/Istanbul"),
    (59.33, 18.07, "Europe/Stockholm"),
    (59.91, 10.75, "Europe/Oslo"),
    (55.68, 12.57, "Europe/Copenhagen"),
    (60.17, 24.94, "Europe/Helsinki"),
    (59.44, 24.75, "Europe/Tallinn"),
    (56.95, 24.11, "Europe/Riga"),
    (54.69, 25.28, "Europe/Vilnius"),
    (50.45, 30.52, "Europe/Kyiv"),
    (53.90, 27.57, "Europe/Minsk"),
    (55.76, 37.62, "Europe/Moscow"),
    // Africa
    (33.57, -7.59, "Africa/Casablanca"),
    (36.75, 3.06, "Africa/Algiers"),
    (36.81, 10.18, "Africa/Tunis"),
    (30.04, 31.24, "Africa/Cairo"),
    (15.50, 32.56, "Africa/Khartoum"),
    (9.03, 38.74, "Africa/Addis_Ababa"),
    (-1.29, 36.82, "Africa/Nairobi"),
    (6.52, 3.38, "Africa/Lagos"),
    (5.56, -0.20, "Africa/Accra"),
    (14.72, -17.47, "Africa/Dakar"),
    (4.05, 9.70, "Africa/Douala"),
    (-4.44, 15.27, "Africa/Kinshasa"),
    (-8.84, 13.23, "Africa/Luanda"),
    (-17.83, 31.05, "Africa/Harare"),
    (-15.42, 28.28, "Africa/Lusaka"),
    (-26.20, 28.04, "Africa/Johannesburg"),
    (-33.92, 18.42, "Africa/Johannesburg"),
    (-22.56, 17.08, "Africa/Windhoek"),
    (-18.88, 47.51, "Indian/Antananarivo"),
    // Middle East & Central Asia
    (32.09, 34.78, "Asia/Jerusalem"),
    (33.89, 35.50, "Asia/Beirut"),
    (33.51, 36.29, "Asia/Damascus"),
    (31.95, 35.93, "Asia/Amman"),
    (33.31, 44.36, "Asia/Baghdad"),
    (24.71, 46.68, "Asia/Riyadh"),
    (25.28, 51.53, "Asia/Qatar"),
    (25.20, 55.27, "Asia/Dubai"),
    (23.59, 58.38, "Asia/Muscat"),
    (35.69, 51.39, "Asia/Tehran"),
    (34.53, 69.17, "Asia/Kabul"),
    (41.31, 69.24, "Asia/Tashkent"),
    (43.24, 76.95, "Asia/Almaty"),
    (40.38, 49.89, "Asia/Baku"),
    (41.72, 44.79, "Asia/Tbilisi"),
    (40.18, 44.51, "Asia/Yerevan"),
    // South & East Asia
    (24.86, 67.00, "Asia/Karachi"),
    (28.61, 77.21, "Asia/Kolkata"),
    (19.08, 72.88, "Asia/Kolkata"),
    (6.93, 79.85, "Asia/Colombo"),
    (27.72, 85.32, "Asia/Kathmandu"),
    (23.81, 90.41, "Asia/Dhaka"),
    (16.87, 96.20, "Asia/Yangon"),
    (13.76, 100.50, "Asia/Bangkok"),
    (11.56, 104.92, "Asia/Phnom_Penh"),
    (21.03, 105.85, "Asia/Ho_Chi_Minh"),
    (3.14, 101.69, "Asia/Kuala_Lumpur"),
    (1.35, 103.82, "Asia/Singapore"),
    (-6.21, 106.85, "Asia/Jakarta"),
    (-8.65, 115.22, "Asia/Makassar"),
    (-2.53, 140.72, "Asia/Jayapura"),
    (14.60, 120.98, "Asia/Manila"),
    (22.32, 114.17, "Asia/Hong_Kong"),
    (25.03, 121.57, "Asia/Taipei"),
    (39.90, 116.41, "Asia/Shanghai"),
    (31.23, 121.47, "Asia/Shanghai"),
    (43.83, 87.62, "Asia/Urumqi"),
    (47.92, 106.92, "Asia/Ulaanbaatar"),
    (37.57, 126.98, "Asia/Seoul"),
    (35.68, 139.69, "Asia/Tokyo"),
    (43.12, 131.89, "Asia/Vladivostok"),
    (56.01, 92.87, "Asia/Krasnoyarsk"),
    (55.03, 82.92, "Asia/Novosibirsk"),
    (56.84, 60.61, "Asia/Yekaterinburg"),
    (62.03, 129.73, "Asia/Yakutsk"),
    (53.04, 158.65, "Asia/Kamchatka"),
    // Oceania
    (-6.31, 143.96, "Pacific/Port_Moresby"),
    (-31.95, 115.86, "Australia/Perth"),
    (-12.46, 130.84, "Australia/Darwin"),
    (-34.93, 138.60, "Australia/Adelaide"),
    (-27.47, 153.03, "Australia/Brisbane"),
    (-33.87, 151.21, "Australia/Sydney"),
    (-37.81, 144.96, "Australia/Melbourne"),
    (-42.88, 147.33, "Australia/Hobart"),
    (-41.29, 174.78, "Pacific/Auckland"),
    (-36.85, 174.76, "Pacific/Auckland"),
    (-18.14, 178.44, "Pacific/Fiji"),
    (-17.54, -149.57, "Pacific/Tahiti"),
    (13.48, 144.79, "Pacific/Guam"),
    // Polar fallbacks
    (78.22, 15.64, "Arctic/Longyearbyen"),
    (-77.85, 166.67, "Antarctica/McMurdo"),
];
