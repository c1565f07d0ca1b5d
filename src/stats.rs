//! Avalanche and bit-independence statistics for mixing functions.
//!
//! A "mix" function here is anything that maps a fixed-size input block to
//! a fixed-size output block.  The whole CityHash32 digest fits that shape
//! once the input length is fixed, and so does each of its primitives.

use std::{fs::File, io::Write, path::Path};

use nanorand::{Rng, WyRand};

pub struct Stats {
    pub input_bit_len: usize,
    pub output_bit_len: usize,
    pub digest_bit_len: usize,

    // The number of samples accumulated.  Or put another way, the number of
    // rounds used to generate the chart.
    pub sample_count: usize,

    // `input_bit_len * output_bit_len` long.  Each element is a count of the
    // number of bit flips for a given in/out bit pairing.
    pub avalanche_chart: Vec<u32>,

    // For every input bit, the BIC quadrants for each ordered pair of
    // distinct output bits: [both, neither, only first, only second].
    pub bic_chart: Vec<[u32; 4]>,
}

/// Min/avg/max of some per-cell or per-row measure.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spread {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl Spread {
    fn of<I: Iterator<Item = f64>>(values: I) -> Spread {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut n = 0usize;
        for v in values {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            n += 1;
        }
        if n == 0 {
            return Spread {
                min: 0.0,
                avg: 0.0,
                max: 0.0,
            };
        }
        Spread {
            min: min,
            avg: sum / n as f64,
            max: max,
        }
    }
}

/// The avalanche numbers `print_report()` shows.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AvalancheSummary {
    /// Per in/out bit pair. 0.0 is a perfect coin flip, 1.0 is never (or
    /// always) flipping.
    pub bias: Spread,
    /// Per input bit, in output bits effectively affected.
    pub diffusion: Spread,
    /// Per input bit, in bits of entropy.
    pub entropy: Spread,
}

impl Stats {
    pub fn new(
        input_bit_len: usize,
        output_bit_len: usize,
        digest_bit_len: usize,
        do_avalanche: bool,
        do_bic: bool,
    ) -> Self {
        Self {
            input_bit_len: input_bit_len,
            output_bit_len: output_bit_len,
            digest_bit_len: digest_bit_len,
            sample_count: 0,
            avalanche_chart: if do_avalanche {
                vec![0; input_bit_len * output_bit_len]
            } else {
                Vec::new()
            },
            bic_chart: if do_bic {
                vec![[0; 4]; input_bit_len * output_bit_len * (output_bit_len - 1)]
            } else {
                Vec::new()
            },
        }
    }

    pub fn accumulate(&mut self, in_bit: usize, out_bit: usize, flipped: bool) {
        self.avalanche_chart[in_bit * self.output_bit_len + out_bit] += flipped as u32;
    }

    pub fn get(&self, in_bit: usize, out_bit: usize) -> u32 {
        self.avalanche_chart[in_bit * self.output_bit_len + out_bit]
    }

    pub fn get_row(&self, in_bit: usize) -> &[u32] {
        let start = in_bit * self.output_bit_len;
        let end = start + self.output_bit_len;
        &self.avalanche_chart[start..end]
    }

    fn norm(&self) -> f64 {
        1.0 / self.sample_count as f64
    }

    pub fn row_diffusion(&self, in_bit: usize) -> f64 {
        let norm = self.norm();
        self.get_row(in_bit)
            .iter()
            .map(|&flips| 1.0 - p_to_bias(flips as f64 * norm))
            .sum()
    }

    pub fn row_entropy(&self, in_bit: usize) -> f64 {
        let norm = self.norm();
        self.get_row(in_bit)
            .iter()
            .map(|&flips| p_to_entropy(flips as f64 * norm))
            .sum()
    }

    /// Mean fraction of output bits flipped by flipping a single input bit.
    /// 0.5 is ideal.
    pub fn flip_rate(&self) -> f64 {
        let total: u64 = self.avalanche_chart.iter().map(|&n| n as u64).sum();
        total as f64 / (self.avalanche_chart.len() * self.sample_count) as f64
    }

    pub fn bias(&self) -> Spread {
        let norm = self.norm();
        Spread::of(
            self.avalanche_chart
                .iter()
                .map(|&flips| p_to_bias(flips as f64 * norm)),
        )
    }

    pub fn input_bit_diffusion(&self) -> Spread {
        Spread::of((0..self.input_bit_len).map(|i| self.row_diffusion(i)))
    }

    pub fn input_bit_entropy(&self) -> Spread {
        Spread::of((0..self.input_bit_len).map(|i| self.row_entropy(i)))
    }

    pub fn avalanche_summary(&self) -> AvalancheSummary {
        AvalancheSummary {
            bias: self.bias(),
            diffusion: self.input_bit_diffusion(),
            entropy: self.input_bit_entropy(),
        }
    }

    fn bic_row(&self, in_bit_idx: usize) -> &[[u32; 4]] {
        let stride = self.output_bit_len * (self.output_bit_len - 1);
        let start = in_bit_idx * stride;
        &self.bic_chart[start..(start + stride)]
    }

    /// Mean spread between the largest and smallest BIC quadrant, relative
    /// to the largest, over the output bit pairs of one input bit.  0.0 means
    /// all four flip combinations were equally common.
    pub fn row_bic_avg_deviation(&self, in_bit_idx: usize) -> f64 {
        let bic = self.bic_row(in_bit_idx);

        let mut sum = 0.0;
        for [a, b, c, d] in bic.iter() {
            let min = *a.min(b).min(c).min(d);
            let max = *a.max(b).max(c).max(d);
            if max > 0 {
                sum += (max - min) as f64 / max as f64;
            }
        }
        sum / bic.len() as f64
    }

    pub fn bic_deviation(&self) -> Spread {
        Spread::of((0..self.input_bit_len).map(|i| self.row_bic_avg_deviation(i)))
    }

    pub fn row_bic_avg_sorted_quadrants(&self, in_bit_idx: usize) -> [f64; 4] {
        let bic = self.bic_row(in_bit_idx);

        let mut sum = [0u64; 4];
        for mut quadrants in bic.iter().copied() {
            quadrants.sort_unstable();
            for (s, q) in sum.iter_mut().zip(quadrants) {
                *s += q as u64;
            }
        }

        let norm = 1.0 / (bic.len() * self.sample_count) as f64;
        sum.map(|s| s as f64 * norm)
    }

    pub fn avg_bic_sorted_quadrants(&self) -> [f64; 4] {
        let mut sum = [0.0; 4];
        for i in 0..self.input_bit_len {
            let n = self.row_bic_avg_sorted_quadrants(i);
            for (s, v) in sum.iter_mut().zip(n) {
                *s += v;
            }
        }
        sum.map(|s| s / self.input_bit_len as f64)
    }

    pub fn worst_bic_sorted_quadrants(&self) -> [f64; 4] {
        let mut worst = [999.0f64, 999.0, 999.0, 0.0];
        for i in 0..self.input_bit_len {
            let n = self.row_bic_avg_sorted_quadrants(i);
            worst[0] = worst[0].min(n[0]);
            worst[1] = worst[1].min(n[1]);
            worst[2] = worst[2].min(n[2]);
            worst[3] = worst[3].max(n[3]);
        }
        worst
    }

    pub fn best_bic_sorted_quadrants(&self) -> [f64; 4] {
        let mut best = [0.0; 4];
        for i in 0..self.input_bit_len {
            let n = self.row_bic_avg_sorted_quadrants(i);
            if n[0] > best[0] {
                best = n;
            }
        }
        best
    }

    pub fn print_report(&self) {
        if !self.avalanche_chart.is_empty() {
            let s = self.avalanche_summary();
            println!(
                "    Flip rate: {:0.4}
    Bias:
        Min: {:0.2}
        Avg: {:0.2}
        Max: {:0.2}
    Input Bit Diffusion (digest size = {} bits):
        Min: {:0.1} bits
        Avg: {:0.1} bits
        Max: {:0.1} bits
    Input Bit Diffusion Entropy (digest size = {} bits):
        Min: {:0.1} bits
        Avg: {:0.1} bits
        Max: {:0.1} bits",
                self.flip_rate(),
                s.bias.min,
                s.bias.avg,
                s.bias.max,
                self.digest_bit_len,
                s.diffusion.min,
                s.diffusion.avg,
                s.diffusion.max,
                self.digest_bit_len,
                s.entropy.min,
                s.entropy.avg,
                s.entropy.max,
            );
        }

        if !self.bic_chart.is_empty() {
            let worst = self.worst_bic_sorted_quadrants();
            let avg = self.avg_bic_sorted_quadrants();
            let best = self.best_bic_sorted_quadrants();
            let deviation = self.bic_deviation();

            println!(
                "    BIC deviation:
        Min: {:0.4}
        Avg: {:0.4}
        Max: {:0.4}
    BIC quadrants (sorted):
        Wrst: [{:0.4}, {:0.4}, {:0.4}, {:0.4}]
         Avg: [{:0.4}, {:0.4}, {:0.4}, {:0.4}]
        Best: [{:0.4}, {:0.4}, {:0.4}, {:0.4}]",
                deviation.min,
                deviation.avg,
                deviation.max,
                worst[0],
                worst[1],
                worst[2],
                worst[3],
                avg[0],
                avg[1],
                avg[2],
                avg[3],
                best[0],
                best[1],
                best[2],
                best[3],
            );
        }
    }

    /// Writes the avalanche chart as a grayscale image, one row per input
    /// bit and one column per output bit.  Mid-gray is ideal.
    pub fn write_avalanche_png<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut pixels = Vec::with_capacity(self.avalanche_chart.len() * 4);

        // No samples gives an all-black chart.
        let samples = (self.sample_count as u64).max(1);
        for flips in self.avalanche_chart.iter().copied() {
            let v = (flips as u64 * 255 / samples).min(255) as u8;
            pixels.extend_from_slice(&[v, v, v, 255]);
        }

        png_encode_mini::write_rgba_from_u8(
            &mut File::create(path.as_ref())?,
            &pixels,
            self.output_bit_len as u32,
            self.input_bit_len as u32,
        )?;

        Ok(())
    }
}

/// Computes avalanche (and optionally BIC) statistics for a mix function,
/// using a provided input generator.
///
/// - `generate_input`: takes a round index and fills an input block.  Must be
///   deterministic in the index, which starts at zero and increments.
/// - `mix`: maps an input block to an output block.  The output buffer is
///   purely an out parameter.
/// - `input_size`/`output_size`: block sizes of `mix`, in bytes.
/// - `digest_size`: size in bytes of the digest of the hash `mix` belongs
///   to.  Only used in the printed report.
/// - `rounds`: how many samples to take.
/// - `show_progress`: print a progress line to stdout while running.
pub fn compute_stats<F1, F2>(
    generate_input: F1,
    mix: F2,
    input_size: usize,
    output_size: usize,
    digest_size: usize,
    rounds: usize,
    do_avalanche: bool,
    do_bic: bool,
    show_progress: bool,
) -> Stats
where
    F1: Fn(usize, &mut [u8]),
    F2: Fn(&[u8], &mut [u8]),
{
    let in_bits = input_size * 8;
    let out_bits = output_size * 8;
    let mut chart = Stats::new(in_bits, out_bits, digest_size * 8, do_avalanche, do_bic);

    let mut input = vec![0u8; input_size];
    let mut output = vec![0u8; output_size];
    let mut input_tweaked = vec![0u8; input_size];
    let mut output_tweaked = vec![0u8; output_size];
    let mut flipped = vec![false; out_bits];

    for round in 0..rounds {
        if show_progress {
            print!(
                "\r                                                  \rRound {}/{}",
                round, rounds
            );
            let _ = std::io::stdout().flush();
        }

        generate_input(round, &mut input[..]);
        mix(&input[..], &mut output[..]);

        for in_bit_idx in 0..in_bits {
            input_tweaked.copy_from_slice(&input[..]);
            input_tweaked[in_bit_idx / 8] ^= 1 << (in_bit_idx % 8);
            mix(&input_tweaked[..], &mut output_tweaked[..]);

            for (out_bit_idx, f) in flipped.iter_mut().enumerate() {
                let i = out_bit_idx / 8;
                let mask = 1 << (out_bit_idx % 8);
                *f = (output[i] & mask) != (output_tweaked[i] & mask);
            }

            if do_avalanche {
                for (out_bit_idx, &f) in flipped.iter().enumerate() {
                    chart.accumulate(in_bit_idx, out_bit_idx, f);
                }
            }

            // Bit independence criterion.
            if do_bic {
                let stride = out_bits * (out_bits - 1);
                for i in 0..out_bits {
                    for j in 0..(out_bits - 1) {
                        let flipped_a = flipped[i];
                        let flipped_b = flipped[(i + j + 1) % out_bits];

                        let k = (in_bit_idx * stride) + (i * (out_bits - 1)) + j;
                        let q = &mut chart.bic_chart[k];
                        q[0] += (flipped_a && flipped_b) as u32;
                        q[1] += (!flipped_a && !flipped_b) as u32;
                        q[2] += (flipped_a && !flipped_b) as u32;
                        q[3] += (!flipped_a && flipped_b) as u32;
                    }
                }
            }
        }

        chart.sample_count += 1;
    }

    if show_progress {
        print!("\r                                                  \r");
        let _ = std::io::stdout().flush();
    }

    chart
}

pub fn p_to_bias(p: f64) -> f64 {
    (p * 2.0 - 1.0).abs()
}

pub fn p_to_entropy(p: f64) -> f64 {
    if p <= 0.0 || p >= 1.0 {
        0.0
    } else {
        let q = 1.0 - p;
        -(p * p.log2()) - (q * q.log2())
    }
}

//-------------------------------------------------------------
// Input generators.

/// Generates a random byte stream.
pub fn generate_random(seed: usize, bytes: &mut [u8]) {
    let mut rng = WyRand::new_seed(mix64(seed as u64));
    rng.fill_bytes(bytes);
}

/// Generates a byte stream with all zero bits except one.
pub fn generate_single_1_bit(index: usize, bytes: &mut [u8]) {
    let bit_idx = index % (bytes.len() * 8);
    bytes.fill(0);
    bytes[bit_idx / 8] = 1 << (bit_idx % 8);
}

/// Generates a byte stream with roughly `n` random bits set to one.
pub fn generate_n_random_bits(seed: usize, bytes: &mut [u8], n: usize) {
    let mut rng = WyRand::new_seed(mix64(seed as u64 ^ mix64(n as u64)));

    bytes.fill(0);
    for _ in 0..n {
        let n = rng.generate_range(0..(bytes.len() * 8));
        bytes[n / 8] |= 1 << (n % 8);
    }
}

/// Generates a byte stream with the lowest bytes counting up as a
/// little-endian integer.  Short blocks get the low bytes of the counter.
pub fn generate_counting(index: usize, bytes: &mut [u8]) {
    let counter = u64::to_le_bytes(index as u64);
    let n = bytes.len().min(8);
    bytes[..n].copy_from_slice(&counter[..n]);
    bytes[n..].fill(0);
}

/// Generates printable ASCII, the kind of keys hash tables usually see.
pub fn generate_ascii(seed: usize, bytes: &mut [u8]) {
    let mut rng = WyRand::new_seed(mix64(seed as u64 ^ 0x41534349));
    for b in bytes.iter_mut() {
        *b = rng.generate_range(0x20u8..0x7f);
    }
}

/// 64-bit bijective bit mixer.
fn mix64(mut n: u64) -> u64 {
    // Break zero sensitivity.
    n ^= 0x7be355f7c2e736d2;

    // http://zimbry.blogspot.ch/2011/09/better-bit-mixing-improving-on.html
    // (variant "Mix13")
    n ^= n >> 30;
    n = n.wrapping_mul(0xbf58476d1ce4e5b9);
    n ^= n >> 27;
    n = n.wrapping_mul(0x94d049bb133111eb);
    n ^= n >> 31;

    n
}
