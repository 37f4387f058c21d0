use fixpt_math::Fixed16_16;
use sha2::{Digest, Sha256};

// Hashes the raw outputs of every math function over a fixed sweep. The
// printed digest must be identical on every platform and optimization level.

fn main() {
    let mut raws: Vec<i32> = Vec::new();

    for step in -400..=400 {
        let x = Fixed16_16::from_raw(step * 1021);
        raws.push(x.sin().raw());
        raws.push(x.cos().raw());
        raws.push(x.atan().raw());
        raws.push(x.exp().raw());
        raws.push(x.cbrt().raw());
        raws.push(x.round().raw());

        let magnitude = x.abs() + Fixed16_16::epsilon();
        raws.push(magnitude.sqrt().raw());
        raws.push(magnitude.log2().raw());
        raws.push(x.atan2(magnitude).raw());
    }

    let mut bytes = Vec::with_capacity(raws.len() * 4);
    for v in &raws {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    let digest = hex::encode(Sha256::digest(&bytes));
    println!("FIXPT_HASH {digest} ({} values)", raws.len());
}
