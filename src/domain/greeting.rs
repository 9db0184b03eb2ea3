/// Fixed body of `GET /`, identical for both server variants.
pub const GREETING: &str = "secure-app: hello from Ali's demo\n";
