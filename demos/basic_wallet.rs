use sol_vault::{
    derive_batch, MnemonicStrength, PrivateKeyFormat, SecureMnemonic, SecureStorage,
    WalletRecord,
};
use std::io::{self, Write};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("SolVault HD Wallet Demo");
    println!("=======================");

    let storage = SecureStorage::new(Path::new("./wallet-data"))?;

    let wallet_password = prompt_password("Enter your wallet password: ")?;

    let mnemonic = if storage.has_mnemonic() {
        println!("Loading existing wallet...");
        let phrase = storage.retrieve_mnemonic(&wallet_password)?;
        SecureMnemonic::from_phrase(&phrase)?
    } else {
        println!("Creating new wallet...");
        let mnemonic = SecureMnemonic::generate(MnemonicStrength::Words12)?;
        storage.store_mnemonic(&mnemonic.phrase(), &wallet_password)?;

        println!("\n⚠️  IMPORTANT: Write down your mnemonic phrase and store it securely!");
        println!("Mnemonic: {}\n", mnemonic.phrase());
        print!("Press Enter to continue...");
        io::stdout().flush()?;
        let mut buffer = String::new();
        io::stdin().read_line(&mut buffer)?;

        mnemonic
    };

    println!("\nDerived Solana Accounts:");

    let records: Vec<WalletRecord> = derive_batch(&mnemonic, 3, 0, PrivateKeyFormat::Base58)
        .collect::<Result<_, _>>()?;

    for record in &records {
        println!("\nPath:      {}", record.path);
        println!("Address:   {}", record.public_key);
        println!("Priv Key:  {}", record.private_key);
    }

    storage.store_records(&records, &wallet_password)?;

    println!("\nWallet operations completed successfully!");
    Ok(())
}

fn prompt_password(prompt: &str) -> Result<String, Box<dyn std::error::Error>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let password = rpassword::read_password()?;
    Ok(password)
}
