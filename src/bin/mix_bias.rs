use cityhash32::{
    mixers::{city32, city32_round, fmix, mur},
    stats::{
        compute_stats, generate_ascii, generate_counting, generate_n_random_bits,
        generate_random, generate_single_1_bit,
    },
};

struct Mixer<'a> {
    name: &'a str,
    mix_function: &'a dyn Fn(&[u8], &mut [u8]),
    input_size: usize,  // In bytes.
    output_size: usize, // In bytes.
    digest_size: usize, // In bytes.
}

const MIXERS: &[Mixer] = &[
    Mixer {
        name: "fmix finalizer",
        mix_function: &fmix::mix_input,
        input_size: fmix::IN_SIZE_BYTES,
        output_size: fmix::OUT_SIZE_BYTES,
        digest_size: fmix::DIGEST_SIZE_BYTES,
    },
    Mixer {
        name: "mur combiner",
        mix_function: &mur::mix_input,
        input_size: mur::IN_SIZE_BYTES,
        output_size: mur::OUT_SIZE_BYTES,
        digest_size: mur::DIGEST_SIZE_BYTES,
    },
    Mixer {
        name: "CityHash32 main loop round",
        mix_function: &city32_round::mix_input,
        input_size: city32_round::IN_SIZE_BYTES,
        output_size: city32_round::OUT_SIZE_BYTES,
        digest_size: city32_round::DIGEST_SIZE_BYTES,
    },
];

struct BitPattern<'a> {
    name: &'a str,
    gen_function: &'a dyn Fn(usize, &mut [u8]),

    /// Number of rounds to run the pattern with. Zero is treated specially, and
    /// means to use the bit width of the input.
    rounds: usize,
}

const PATTERNS: &[BitPattern] = &[
    BitPattern {
        name: "random",
        gen_function: &generate_random,
        rounds: 1 << 14,
    },
    BitPattern {
        name: "counting",
        gen_function: &generate_counting,
        rounds: 1 << 14,
    },
    BitPattern {
        name: "ascii",
        gen_function: &generate_ascii,
        rounds: 1 << 14,
    },
    BitPattern {
        name: "8 random bits",
        gen_function: &|seed, bytes| generate_n_random_bits(seed, bytes, 8),
        rounds: 1 << 14,
    },
    BitPattern {
        name: "single-bit",
        gen_function: &generate_single_1_bit,

        // NOTE: this pattern only has as many distinct inputs as there are
        // input bits, so even a perfect mixer won't reach zero bias here.
        rounds: 0,
    },
];

fn main() {
    let mut do_bic = false;
    let mut do_png = false;
    let mut name_filters = Vec::new();

    for arg in std::env::args().skip(1) {
        if !arg.starts_with("-") {
            name_filters.push(arg.to_lowercase());
            continue;
        }

        match arg.as_str() {
            "--bic" => do_bic = true,
            "--png" => do_png = true,
            _ => {
                eprintln!("Unknown option \"{}\". Options: --bic --png", arg);
                std::process::exit(1);
            }
        }
    }

    // The full digest, once per interesting input size.
    let digest_fn: &dyn Fn(&[u8], &mut [u8]) = &city32::mix_input;
    let digest_mixers: Vec<(String, usize)> = city32::BRACKET_SIZES
        .iter()
        .map(|&size| (format!("CityHash32, {} byte input", size), size))
        .collect();

    let mixers = MIXERS
        .iter()
        .map(|m| {
            (
                m.name.to_string(),
                m.mix_function,
                m.input_size,
                m.output_size,
                m.digest_size,
            )
        })
        .chain(digest_mixers.iter().map(|(name, size)| {
            (
                name.clone(),
                digest_fn,
                *size,
                city32::OUT_SIZE_BYTES,
                city32::DIGEST_SIZE_BYTES,
            )
        }));

    for (name, mix_function, input_size, output_size, digest_size) in mixers {
        if !name_filters.is_empty() {
            let lower_name = name.to_lowercase();

            if !name_filters
                .iter()
                .any(|filter| lower_name.contains(filter))
            {
                continue;
            }
        }

        println!("\n================================");
        println!("{}", name);
        for pattern in PATTERNS.iter() {
            println!("\nInput bit pattern: {}", pattern.name);
            let stats = compute_stats(
                pattern.gen_function,
                mix_function,
                input_size,
                output_size,
                digest_size,
                if pattern.rounds == 0 {
                    input_size * 8
                } else {
                    pattern.rounds
                },
                true,
                do_bic,
                true,
            );
            stats.print_report();
            if do_png {
                let path = format!("{} - {}.png", name, pattern.name);
                if let Err(e) = stats.write_avalanche_png(&path) {
                    eprintln!("Failed to write \"{}\": {}", path, e);
                }
            }
        }
    }
}
