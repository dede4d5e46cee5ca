fn main() -> anyhow::Result<()> {
    demucs_stems::init_logging("info");

    let mut args = std::env::args().skip(1);
    let input = args.next().expect("usage: separate_one <audio> [model]");
    let model = args.next().unwrap_or_else(|| "mdx_extra_q".into());

    let audio = demucs_stems::read_audio(&input)?;
    let result = demucs_stems::run_separation(&audio, &model, 1, 0.25);

    for (stem, path) in result.iter() {
        match path {
            Some(p) => eprintln!("{stem}: {}", p.display()),
            None => eprintln!("{stem}: -"),
        }
    }
    Ok(())
}
