//! Irish Grid (EPSG:29902, TM65) to WGS84 reprojection.
//!
//! The inverse Transverse Mercator follows the Ordnance Survey series
//! expansions; the datum shift is a 7-parameter Helmert transform in the
//! position-vector convention, matching `+towgs84` of EPSG:29902.

use crate::error::{ConvertError, Result};

#[derive(Debug, Clone, Copy)]
pub struct Ellipsoid {
    pub a: f64,
    pub b: f64,
}

impl Ellipsoid {
    fn e2(&self) -> f64 {
        (self.a * self.a - self.b * self.b) / (self.a * self.a)
    }
}

/// Airy Modified 1849
pub const AIRY_MODIFIED: Ellipsoid = Ellipsoid {
    a: 6_377_340.189,
    b: 6_356_034.447,
};

pub const WGS84: Ellipsoid = Ellipsoid {
    a: 6_378_137.0,
    b: 6_356_752.314_245,
};

#[derive(Debug, Clone, Copy)]
pub struct TransverseMercator {
    pub ellipsoid: Ellipsoid,
    pub scale: f64,
    /// degrees
    pub lat0: f64,
    /// degrees
    pub lon0: f64,
    pub false_easting: f64,
    pub false_northing: f64,
}

pub const IRISH_GRID: TransverseMercator = TransverseMercator {
    ellipsoid: AIRY_MODIFIED,
    scale: 1.000_035,
    lat0: 53.5,
    lon0: -8.0,
    false_easting: 200_000.0,
    false_northing: 250_000.0,
};

/// Translations in metres, rotations in arc-seconds, scale in ppm.
#[derive(Debug, Clone, Copy)]
pub struct Helmert {
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
    pub s: f64,
}

pub const TM65_TO_WGS84: Helmert = Helmert {
    tx: 482.5,
    ty: -130.6,
    tz: 564.6,
    rx: -1.042,
    ry: -0.214,
    rz: -0.631,
    s: 8.15,
};

/// Returns `(latitude, longitude)` in WGS84 decimal degrees.
pub fn irish_grid_to_wgs84(easting: f64, northing: f64) -> Result<(f64, f64)> {
    if !easting.is_finite() || !northing.is_finite() {
        return Err(ConvertError::OutOfRange {
            x: easting,
            y: northing,
        });
    }

    let (lat, lon) = IRISH_GRID.inverse(easting, northing);
    let cartesian = to_cartesian(&AIRY_MODIFIED, lat, lon);
    let shifted = TM65_TO_WGS84.apply(cartesian);
    let (lat, lon) = to_geodetic(&WGS84, shifted);

    let (lat, lon) = (lat.to_degrees(), lon.to_degrees());
    if !lat.is_finite() || !lon.is_finite() || lat.abs() > 90.0 {
        return Err(ConvertError::OutOfRange {
            x: easting,
            y: northing,
        });
    }
    Ok((lat, lon))
}

impl TransverseMercator {
    fn meridional_arc(&self, lat: f64) -> f64 {
        let Ellipsoid { a, b } = self.ellipsoid;
        let n = (a - b) / (a + b);
        let (n2, n3) = (n * n, n * n * n);
        let lat0 = self.lat0.to_radians();
        let d = lat - lat0;
        let s = lat + lat0;

        b * self.scale
            * ((1.0 + n + 1.25 * n2 + 1.25 * n3) * d
                - (3.0 * n + 3.0 * n2 + 21.0 / 8.0 * n3) * d.sin() * s.cos()
                + (15.0 / 8.0 * n2 + 15.0 / 8.0 * n3) * (2.0 * d).sin() * (2.0 * s).cos()
                - 35.0 / 24.0 * n3 * (3.0 * d).sin() * (3.0 * s).cos())
    }

    /// Grid coordinate to geodetic `(lat, lon)` in radians on the grid's ellipsoid.
    pub fn inverse(&self, easting: f64, northing: f64) -> (f64, f64) {
        let a = self.ellipsoid.a;
        let e2 = self.ellipsoid.e2();
        let f0 = self.scale;
        let dn = northing - self.false_northing;

        let mut lat = self.lat0.to_radians();
        let mut m = 0.0;
        // 0.01mm
        for _ in 0..32 {
            lat += (dn - m) / (a * f0);
            m = self.meridional_arc(lat);
            if (dn - m).abs() < 1e-5 {
                break;
            }
        }

        let sin = lat.sin();
        let cos = lat.cos();
        let tan = lat.tan();
        let sec = 1.0 / cos;
        let t2 = tan * tan;
        let t4 = t2 * t2;
        let t6 = t4 * t2;

        let nu = a * f0 / (1.0 - e2 * sin * sin).sqrt();
        let rho = a * f0 * (1.0 - e2) / (1.0 - e2 * sin * sin).powf(1.5);
        let eta2 = nu / rho - 1.0;

        let vii = tan / (2.0 * rho * nu);
        let viii = tan / (24.0 * rho * nu.powi(3)) * (5.0 + 3.0 * t2 + eta2 - 9.0 * t2 * eta2);
        let ix = tan / (720.0 * rho * nu.powi(5)) * (61.0 + 90.0 * t2 + 45.0 * t4);
        let x = sec / nu;
        let xi = sec / (6.0 * nu.powi(3)) * (nu / rho + 2.0 * t2);
        let xii = sec / (120.0 * nu.powi(5)) * (5.0 + 28.0 * t2 + 24.0 * t4);
        let xiia = sec / (5040.0 * nu.powi(7)) * (61.0 + 662.0 * t2 + 1320.0 * t4 + 720.0 * t6);

        let de = easting - self.false_easting;
        let lat_out = lat - vii * de.powi(2) + viii * de.powi(4) - ix * de.powi(6);
        let lon_out = self.lon0.to_radians() + x * de - xi * de.powi(3) + xii * de.powi(5)
            - xiia * de.powi(7);

        (lat_out, lon_out)
    }
}

impl Helmert {
    pub fn apply(&self, (x, y, z): (f64, f64, f64)) -> (f64, f64, f64) {
        let arcsec = |v: f64| (v / 3600.0).to_radians();
        let (rx, ry, rz) = (arcsec(self.rx), arcsec(self.ry), arcsec(self.rz));
        let s1 = 1.0 + self.s * 1e-6;

        (
            self.tx + s1 * x - rz * y + ry * z,
            self.ty + rz * x + s1 * y - rx * z,
            self.tz - ry * x + rx * y + s1 * z,
        )
    }
}

fn to_cartesian(ellipsoid: &Ellipsoid, lat: f64, lon: f64) -> (f64, f64, f64) {
    let e2 = ellipsoid.e2();
    let nu = ellipsoid.a / (1.0 - e2 * lat.sin().powi(2)).sqrt();
    (
        nu * lat.cos() * lon.cos(),
        nu * lat.cos() * lon.sin(),
        (1.0 - e2) * nu * lat.sin(),
    )
}

fn to_geodetic(ellipsoid: &Ellipsoid, (x, y, z): (f64, f64, f64)) -> (f64, f64) {
    let e2 = ellipsoid.e2();
    let p = (x * x + y * y).sqrt();
    let mut lat = z.atan2(p * (1.0 - e2));
    for _ in 0..10 {
        let nu = ellipsoid.a / (1.0 - e2 * lat.sin().powi(2)).sqrt();
        let next = (z + e2 * nu * lat.sin()).atan2(p);
        if (next - lat).abs() < 1e-12 {
            lat = next;
            break;
        }
        lat = next;
    }
    (lat, y.atan2(x))
}
