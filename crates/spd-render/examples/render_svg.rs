use std::io::Read as _;

fn main() {
    let mut input = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut input) {
        eprintln!("failed to read stdin: {err}");
        std::process::exit(1);
    }

    let tree = match spd_core::parse(&input) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("parse failed: {err}");
            std::process::exit(1);
        }
    };

    let svg = spd_render::render(tree.as_ref(), &spd_render::RenderOptions::default());
    println!("{svg}");
}
