use color_print::cformat;
use i2casm::parser::Stmt;
use i2casm::{to_hex, Assembler};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about = "Assembler for the I2C soft-core MCU", help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.i2c")]
    input: String,

    /// Output file (hex listing, one word per line)
    #[clap(short, long, default_value = "main.i2c.hex")]
    output: String,

    /// Dump assembly listing
    #[clap(short, long)]
    dump: bool,
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();

    let source = std::fs::read_to_string(&args.input)
        .unwrap_or_else(|e| exit_with(&cformat!("<r,s>Failed to open file</> {}: {}", args.input, e)));

    let asm = match Assembler::parse(&source) {
        Ok(asm) => asm,
        Err(err) => {
            err.print_diag(&args.input);
            std::process::exit(1);
        }
    };

    let program = match asm.encode() {
        Ok(program) => program,
        Err(err) => {
            err.print_diag(&args.input);
            std::process::exit(1);
        }
    };

    if args.dump {
        dump(&asm);
        println!("  - found #{} labels", asm.labels().len());
    }

    std::fs::write(&args.output, to_hex(&program))
        .unwrap_or_else(|e| exit_with(&cformat!("<r,s>Failed to write file</> {}: {}", args.output, e)));
    println!("  > {} ({} words)", args.output, program.len());
}

fn exit_with(msg: &str) -> ! {
    eprintln!("{msg}");
    std::process::exit(1)
}

fn dump(asm: &Assembler) {
    let mut pc: u16 = 0;
    println!("------+------+-------+--------------------------------");
    for line in asm.lines() {
        let comment = match line.comment() {
            Some(c) => format!(" ;{c}"),
            None => String::new(),
        };
        match line.stmt() {
            Some(Stmt::Code(code)) => {
                // pass 2 succeeded before dump, so resolve cannot fail here
                let body = match asm.resolve(code, line.no()) {
                    Ok(inst) => {
                        let bin = inst.to_bin();
                        cformat!(
                            "<green>{:>4X}</> | {:02X} {:02X} | {}",
                            pc,
                            bin >> 8,
                            bin & 0xFF,
                            inst.cformat()
                        )
                    }
                    Err(_) => cformat!("     |       | <r,s>! ERROR</>"),
                };
                println!(" {:>4} | {}{}", line.no(), body, comment);
                pc += 1;
            }
            Some(Stmt::Label(name)) => {
                println!(" {:>4} |      |       | {}{}", line.no(), cformat!("<green>{}:</>", name), comment);
            }
            None => {
                println!(" {:>4} |      |       |{}", line.no(), comment);
            }
        }
    }
    println!("------+------+-------+--------------------------------");
}
