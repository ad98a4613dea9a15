//! SPI Commands for the 1.54" (C) E-Ink Display (152x152, black/white/red)
use crate::traits;

#[allow(dead_code)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    PanelSetting = 0x00,

    PowerSetting = 0x01,
    PowerOff = 0x02,
    PowerOn = 0x04,
    BoosterSoftStart = 0x06,
    /// Needs the check code 0xA5
    DeepSleep = 0x07,
    /// Black/white plane
    DataStartTransmission1 = 0x10,
    DisplayRefresh = 0x12,
    /// Red plane
    DataStartTransmission2 = 0x13,

    LutForVcom = 0x20,
    LutWhiteToWhite = 0x21,
    LutBlackToWhite = 0x22,
    LutWhiteToBlack = 0x23,
    LutBlackToBlack = 0x24,
    LutRedVcom = 0x25,
    LutRed0 = 0x26,
    LutRed1 = 0x27,

    PllControl = 0x30,
    TemperatureSensorCommand = 0x40,
    TemperatureSensorSelection = 0x41,
    VcomAndDataIntervalSetting = 0x50,
    /// HRES[7:3], VRES[8], VRES[7:0]
    TconResolution = 0x61,
    VcmDcSetting = 0x82,
    PowerSaving = 0xE3,
}

impl traits::Command for Command {
    /// Returns the address of the command
    fn address(self) -> u8 {
        self as u8
    }
}
